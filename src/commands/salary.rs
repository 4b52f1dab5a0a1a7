// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::SalaryConfig;
use crate::store::{SALARY_DOC, Store, collections};
use crate::utils::{fmt_money, parse_decimal};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("show", _)) => show(store)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = SalaryConfig {
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        active: !sub.get_flag("inactive"),
        note: sub.get_one::<String>("note").cloned(),
    };
    cfg.validate()?;
    store.set(
        collections::CONFIG,
        SALARY_DOC,
        serde_json::to_value(&cfg)?,
        true,
    )?;
    println!(
        "Salary set to {} per month ({})",
        fmt_money(cfg.amount),
        if cfg.active { "active" } else { "inactive" }
    );
    Ok(())
}

fn show(store: &Store) -> Result<()> {
    let ledger = store.load_ledger()?;
    match ledger.salary {
        Some(cfg) => {
            println!(
                "Salary: {} per month, {}{}",
                fmt_money(cfg.amount),
                if cfg.active { "active" } else { "inactive" },
                cfg.note.map(|n| format!(" ({})", n)).unwrap_or_default()
            );
        }
        None => println!("No salary configured"),
    }
    Ok(())
}
