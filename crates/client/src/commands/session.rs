// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `show`, `watch`, `desk` and `session` commands.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use desk_core::{DeskStatus, SessionState};

use super::{connect, print_state};
use crate::display;
use crate::error::{Error, Result};
use crate::session::DeskClient;
use crate::sync::ConnectionStatus;

pub async fn show() -> Result<()> {
    let client = connect().await?;
    print_state(&client.store().current());
    client.shutdown().await;
    Ok(())
}

pub async fn set_desk_status(status: DeskStatus) -> Result<()> {
    let client = connect().await?;
    let result = client.dispatcher().set_desk_status(status).await;
    client.shutdown().await;
    print_state(&result?);
    Ok(())
}

pub async fn clear() -> Result<()> {
    let mut client = connect().await?;
    let result = client.clear_session().await;
    client.shutdown().await;
    result?;
    println!("Session cleared.");
    Ok(())
}

fn render(state: &SessionState, status: ConnectionStatus) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", display::format_state(state, Some(status)))?;
    writeln!(out)?;
    out.flush()
}

/// Follows the session until interrupted.
///
/// Every applied snapshot is rendered. A lost connection waits for the
/// operator to press Enter, then reloads; a render failure reloads on its own.
pub async fn watch() -> Result<()> {
    let mut client = connect().await?;
    let (tx, mut states) = mpsc::unbounded_channel();
    let subscription = client.store().subscribe(move |state: &SessionState| {
        // Receiver gone means watch is shutting down.
        let _ = tx.send(state.clone());
    });

    let result = follow(&mut client, &mut states).await;

    client.store().unsubscribe(subscription);
    client.shutdown().await;
    result
}

async fn follow(
    client: &mut DeskClient,
    states: &mut mpsc::UnboundedReceiver<SessionState>,
) -> Result<()> {
    let mut status = client.watch_status().ok_or(Error::NoSession)?;
    let mut supervising = true;
    let mut lost = false;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    render(&client.store().current(), client.status())?;

    loop {
        let mut failed = false;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            Some(state) = states.recv() => {
                if let Err(e) = render(&state, client.status()) {
                    tracing::error!(error = %e, "render failed");
                    failed = true;
                }
            }
            changed = status.changed(), if supervising => {
                if changed.is_err() {
                    supervising = false;
                    continue;
                }
                let current = *status.borrow_and_update();
                println!("{}", display::format_connection(current));
                lost = current == ConnectionStatus::Lost;
            }
            line = input.next_line(), if lost => {
                if line?.is_none() {
                    return Ok(());
                }
                failed = true;
            }
        }

        if failed {
            client.reload().await?;
            status = client.watch_status().ok_or(Error::NoSession)?;
            supervising = true;
            lost = false;
            render(&client.store().current(), client.status())?;
        }
    }
}
