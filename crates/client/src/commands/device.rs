// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use desk_core::command::SetDevices;

use super::{connect, print_state};
use crate::display;
use crate::error::Result;
use crate::sync::{MutationDispatcher, ReqwestTransport};
use crate::{DeviceCommand, PrinterCommand, ReaderCommand};

async fn execute(dispatcher: &MutationDispatcher<ReqwestTransport>, command: DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::List => {
            let devices = dispatcher.list_possible_devices().await?;
            if devices.is_empty() {
                println!("No devices available.");
            }
            for device in &devices {
                println!("{}", display::format_device(device));
            }
        }
        DeviceCommand::Reader(ReaderCommand::Set { path }) => {
            print_state(&dispatcher.register_reader(&path).await?)
        }
        DeviceCommand::Reader(ReaderCommand::Unset) => {
            print_state(&dispatcher.unregister_reader().await?)
        }
        DeviceCommand::Printer(PrinterCommand::Set { path, mode }) => {
            print_state(&dispatcher.register_printer(&path, mode.into()).await?)
        }
        DeviceCommand::Printer(PrinterCommand::Unset) => {
            print_state(&dispatcher.unregister_printer().await?)
        }
        DeviceCommand::Allow { readers, printers } => {
            let devices = SetDevices {
                reader_names: readers,
                printer_names: printers,
            };
            print_state(&dispatcher.set_devices(&devices).await?);
        }
    }
    Ok(())
}

pub async fn run(command: DeviceCommand) -> Result<()> {
    let client = connect().await?;
    let result = execute(client.dispatcher(), command).await;
    client.shutdown().await;
    result
}
