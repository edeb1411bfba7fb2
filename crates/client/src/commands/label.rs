// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;

use super::{connect, print_state};
use crate::error::Result;
use crate::LabelCommand;

pub async fn run(command: LabelCommand) -> Result<()> {
    let client = connect().await?;
    let dispatcher = client.dispatcher();
    let result = match command {
        LabelCommand::Preview { out } => match dispatcher.preview_label().await {
            Ok(bytes) => fs::write(&out, &bytes)
                .map(|()| println!("Wrote {} bytes to {}", bytes.len(), out.display()))
                .map_err(Into::into),
            Err(e) => Err(e),
        },
        LabelCommand::Print => dispatcher.print_label().await.map(|state| print_state(&state)),
    };
    client.shutdown().await;
    result
}
