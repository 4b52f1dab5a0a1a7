// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accrual;
pub mod aggregate;
pub mod attribution;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod models;
pub mod status;
pub mod store;
pub mod utils;
