// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advances;
pub mod cards;
pub mod dashboard;
pub mod doctor;
pub mod expenses;
pub mod incomes;
pub mod jars;
pub mod reports;
pub mod salary;
