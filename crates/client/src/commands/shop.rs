// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use desk_core::ShopApiConfig;

use super::{connect, print_state};
use crate::error::Result;
use crate::ShopCommand;

pub async fn run(command: ShopCommand) -> Result<()> {
    let client = connect().await?;
    let dispatcher = client.dispatcher();
    let result = match command {
        ShopCommand::Set {
            domain,
            key,
            secret,
        } => {
            let config = ShopApiConfig {
                domain,
                api_key: key,
                api_secret: secret,
            };
            dispatcher.set_shop_api(&config).await.map(|state| print_state(&state))
        }
        ShopCommand::Check => dispatcher.check_shop_api().await.map(|ok| {
            if ok {
                println!("Shop API reachable.");
            } else {
                println!("Shop API unreachable.");
            }
        }),
    };
    client.shutdown().await;
    result
}
