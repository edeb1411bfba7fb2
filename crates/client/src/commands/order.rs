// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use desk_core::command::OrderModifyRequest;

use super::{connect, print_state};
use crate::display;
use crate::error::Result;
use crate::sync::MutationDispatcher;
use crate::sync::ReqwestTransport;
use crate::OrderCommand;

fn parse_uuid(kind: &str, raw: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(raw.trim())
        .map_err(|_| desk_core::Error::InvalidInput(format!("invalid {kind} id: '{raw}'")).into())
}

async fn execute(dispatcher: &MutationDispatcher<ReqwestTransport>, command: OrderCommand) -> Result<()> {
    match command {
        OrderCommand::Set { id } => print_state(&dispatcher.set_order(&id).await?),
        OrderCommand::Clear => print_state(&dispatcher.clear_order().await?),
        OrderCommand::Search { keywords } => {
            let orders = dispatcher.search_orders(&keywords).await?;
            if orders.is_empty() {
                println!("No orders found.");
            }
            for order in &orders {
                println!("{}", display::format_order_line(order));
            }
        }
        OrderCommand::Use { product_id } => print_state(&dispatcher.mark_used(&product_id).await?),
        OrderCommand::Respond {
            product_id,
            option_id,
            value,
        } => {
            let request = OrderModifyRequest::custom_response(
                parse_uuid("product", &product_id)?,
                parse_uuid("option", &option_id)?,
                value,
            );
            print_state(&dispatcher.modify_order(request).await?);
        }
        OrderCommand::Refund { otp } => print_state(&dispatcher.refund_order(&otp).await?),
        OrderCommand::Automated { id } => print_state(&dispatcher.automated_order(&id).await?),
    }
    Ok(())
}

pub async fn run(command: OrderCommand) -> Result<()> {
    let client = connect().await?;
    let result = execute(client.dispatcher(), command).await;
    client.shutdown().await;
    result
}
