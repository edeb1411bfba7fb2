// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[parameterized(
    idle = { "idle", DeskStatus::Idle },
    registering = { "registering", DeskStatus::Registering },
    closed = { "closed", DeskStatus::Closed },
    automated = { "automated", DeskStatus::Automated },
)]
fn test_desk_status_argument(arg: &str, expected: DeskStatus) {
    match parse(&["desk", "desk", arg]).unwrap().command {
        Command::Desk { status } => assert_eq!(DeskStatus::from(status), expected),
        _ => panic!("Expected Desk command"),
    }
}

#[test]
fn test_unknown_desk_status_is_rejected() {
    assert!(parse(&["desk", "desk", "sleeping"]).is_err());
}

#[test]
fn test_order_set() {
    match parse(&["desk", "order", "set", "abc"]).unwrap().command {
        Command::Order(OrderCommand::Set { id }) => assert_eq!(id, "abc"),
        _ => panic!("Expected order set"),
    }
}

#[test]
fn test_order_search_keeps_raw_keywords() {
    match parse(&["desk", "order", "search", "Kim, ACME"]).unwrap().command {
        Command::Order(OrderCommand::Search { keywords }) => assert_eq!(keywords, "Kim, ACME"),
        _ => panic!("Expected order search"),
    }
}

#[test]
fn test_label_preview_default_path() {
    match parse(&["desk", "label", "preview"]).unwrap().command {
        Command::Label(LabelCommand::Preview { out }) => assert_eq!(out, PathBuf::from("label.png")),
        _ => panic!("Expected label preview"),
    }
}

#[test]
fn test_printer_set_mode() {
    match parse(&["desk", "device", "printer", "set", "/dev/ttyACM1", "--mode", "tspl"])
        .unwrap()
        .command
    {
        Command::Device(DeviceCommand::Printer(PrinterCommand::Set { path, mode })) => {
            assert_eq!(path, "/dev/ttyACM1");
            assert_eq!(PrinterCmdType::from(mode), PrinterCmdType::Tspl);
        }
        _ => panic!("Expected printer set"),
    }
}

#[test]
fn test_device_allow_collects_names() {
    match parse(&["desk", "device", "allow", "--reader", "A", "--reader", "B", "--printer", "P"])
        .unwrap()
        .command
    {
        Command::Device(DeviceCommand::Allow { readers, printers }) => {
            assert_eq!(readers, vec!["A", "B"]);
            assert_eq!(printers, vec!["P"]);
        }
        _ => panic!("Expected device allow"),
    }
}

#[test]
fn test_shop_set_requires_all_fields() {
    assert!(parse(&["desk", "shop", "set", "--domain", "https://shop.example.com"]).is_err());
}
