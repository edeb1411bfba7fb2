// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use desk_core::{DeskStatus, PrinterCmdType};

const QUICKSTART_HELP: &str = "\
Get started:
  desk watch                  Follow the session live
  desk desk idle              Open the desk for orders
  desk order set <order-id>   Start handling an order
  desk label print            Print labels for the active order
  desk order clear            Finish the active order";

#[derive(Parser)]
#[command(name = "desk")]
#[command(about = "Registration desk client for the on-site ticket counter")]
#[command(
    long_about = "Registration desk client for the on-site ticket counter.\n\n\
    Keeps a live copy of this desk's session and issues desk, order, label and device commands."
)]
#[command(version)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Follow the session and connection status live
    Watch,

    /// Print the current session once
    Show,

    /// Change the desk status
    #[command(arg_required_else_help = true)]
    Desk {
        /// New desk status
        status: DeskStatusArg,
    },

    /// Select, search, modify or refund orders
    #[command(subcommand)]
    Order(OrderCommand),

    /// Preview or print labels for the active order
    #[command(subcommand)]
    Label(LabelCommand),

    /// Manage barcode readers and label printers
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Configure the shop API the server talks to
    #[command(subcommand)]
    Shop(ShopCommand),

    /// Manage the session itself
    #[command(subcommand)]
    Session(SessionCommand),

    /// Inspect client configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Desk statuses an operator may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeskStatusArg {
    Idle,
    Registering,
    Closed,
    Automated,
}

impl From<DeskStatusArg> for DeskStatus {
    fn from(arg: DeskStatusArg) -> Self {
        match arg {
            DeskStatusArg::Idle => DeskStatus::Idle,
            DeskStatusArg::Registering => DeskStatus::Registering,
            DeskStatusArg::Closed => DeskStatus::Closed,
            DeskStatusArg::Automated => DeskStatus::Automated,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PrinterModeArg {
    #[default]
    Escp,
    Tspl,
}

impl From<PrinterModeArg> for PrinterCmdType {
    fn from(arg: PrinterModeArg) -> Self {
        match arg {
            PrinterModeArg::Escp => PrinterCmdType::Escp,
            PrinterModeArg::Tspl => PrinterCmdType::Tspl,
        }
    }
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Start handling an order
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        desk order set 6f1c2a3b-4d5e-4f60-8a71-92b3c4d5e6f7"
    )]
    Set {
        /// Order id (UUID)
        id: String,
    },

    /// Release the active order
    Clear,

    /// Find orders by custom response
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        desk order search \"Kim Minji\"           Search by one response\n  \
        desk order search \"Kim Minji, ACME\"     Match several responses"
    )]
    Search {
        /// Comma-separated custom responses
        keywords: String,
    },

    /// Mark a product of the active order as handed out
    #[command(arg_required_else_help = true)]
    Use {
        /// Product id within the active order
        product_id: String,
    },

    /// Rewrite a custom response on the active order
    #[command(arg_required_else_help = true)]
    Respond {
        /// Product id within the active order
        product_id: String,
        /// Option id within the product
        option_id: String,
        /// New response
        value: String,
    },

    /// Refund the active order
    #[command(arg_required_else_help = true)]
    Refund {
        /// One-time password from the shop
        otp: String,
    },

    /// Select, print and release an order in one step
    #[command(arg_required_else_help = true)]
    Automated {
        /// Order id (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
pub enum LabelCommand {
    /// Render the label for the active order to a file
    Preview {
        /// Output image path
        #[arg(long, short, default_value = "label.png")]
        out: PathBuf,
    },

    /// Print labels for the active order
    Print,
}

#[derive(Subcommand)]
pub enum DeviceCommand {
    /// List devices that can be registered
    List,

    /// Barcode reader of this desk
    #[command(subcommand)]
    Reader(ReaderCommand),

    /// Label printer of this desk
    #[command(subcommand)]
    Printer(PrinterCommand),

    /// Set the application-wide device allow list
    Allow {
        /// Reader device names
        #[arg(long = "reader")]
        readers: Vec<String>,
        /// Printer device names
        #[arg(long = "printer")]
        printers: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ReaderCommand {
    /// Bind a reader by CDC device path
    #[command(arg_required_else_help = true)]
    Set {
        /// Absolute CDC path, as shown by `desk device list`
        path: String,
    },
    /// Unbind the reader
    Unset,
}

#[derive(Subcommand)]
pub enum PrinterCommand {
    /// Bind a printer by CDC device path
    #[command(arg_required_else_help = true)]
    Set {
        /// Absolute CDC path, as shown by `desk device list`
        path: String,
        /// Printer command protocol
        #[arg(long, value_enum, default_value_t = PrinterModeArg::Escp)]
        mode: PrinterModeArg,
    },
    /// Unbind the printer
    Unset,
}

#[derive(Subcommand)]
pub enum ShopCommand {
    /// Point the server at a shop API
    Set {
        /// Shop base URL
        #[arg(long)]
        domain: String,
        /// API key
        #[arg(long)]
        key: String,
        /// API secret
        #[arg(long)]
        secret: String,
    },
    /// Check that the shop API answers
    Check,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// End the session and forget its id
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
