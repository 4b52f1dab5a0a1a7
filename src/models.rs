// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Error;

/// Closed expense category set. Unknown stored values decode as `Outro` so
/// that dashboards keep rendering over old or hand-edited data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Alimentacao,
    Transporte,
    Moradia,
    Saude,
    Lazer,
    Educacao,
    Roupas,
    Tecnologia,
    Outro,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(de)?;
        Ok(Category::parse(&s).unwrap_or(Category::Outro))
    }
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Alimentacao,
        Category::Transporte,
        Category::Moradia,
        Category::Saude,
        Category::Lazer,
        Category::Educacao,
        Category::Roupas,
        Category::Tecnologia,
        Category::Outro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alimentacao => "alimentacao",
            Category::Transporte => "transporte",
            Category::Moradia => "moradia",
            Category::Saude => "saude",
            Category::Lazer => "lazer",
            Category::Educacao => "educacao",
            Category::Roupas => "roupas",
            Category::Tecnologia => "tecnologia",
            Category::Outro => "outro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Transporte => "Transporte",
            Category::Moradia => "Moradia",
            Category::Saude => "Saúde",
            Category::Lazer => "Lazer",
            Category::Educacao => "Educação",
            Category::Roupas => "Roupas",
            Category::Tecnologia => "Tecnologia",
            Category::Outro => "Outro",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        let needle = s.trim().to_lowercase();
        Category::ALL.iter().copied().find(|c| c.as_str() == needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Pix,
    Cash,
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(de)?;
        // Unknown stored methods behave like the app's default tab.
        Ok(PaymentMethod::parse(&s).unwrap_or(PaymentMethod::Card))
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "cash",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentMethod> {
        match s.trim().to_lowercase().as_str() {
            "card" | "cartao" => Some(PaymentMethod::Card),
            "pix" => Some(PaymentMethod::Pix),
            "cash" | "dinheiro" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

/// Money received or already held, optionally growing at a daily
/// business-day rate (its own, or the linked jar's).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub yield_rate: Option<Decimal>,
    #[serde(default)]
    pub jar_name: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Income {
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::validation("income description is required"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::validation("income amount must be positive"));
        }
        if let Some(rate) = self.yield_rate {
            if rate < Decimal::ZERO {
                return Err(Error::validation("yield rate cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Money spent, possibly split into equal installments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    pub payment: PaymentMethod,
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default = "one", deserialize_with = "lenient_u32")]
    pub installments: u32,
    /// Explicit `YYYY-MM` override for the first installment's due month.
    #[serde(default)]
    pub first_due_month: Option<String>,
    #[serde(default)]
    pub creditor: Option<String>,
    #[serde(default)]
    pub creditor_contact: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

fn one() -> u32 {
    1
}

impl Expense {
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::validation("expense description is required"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::validation("expense amount must be positive"));
        }
        if let Some(m) = &self.first_due_month {
            if crate::calendar::split_month_key(m).is_none() {
                return Err(Error::validation(format!(
                    "invalid first due month '{}', expected YYYY-MM",
                    m
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub holder: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub limit: Option<Decimal>,
    /// Monthly due day 1..=31, clamped to actual month length at use.
    #[serde(default, deserialize_with = "lenient_u32_opt")]
    pub due_day: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Card {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("card name is required"));
        }
        if let Some(day) = self.due_day {
            if !(1..=31).contains(&day) {
                return Err(Error::validation("card due day must be between 1 and 31"));
            }
        }
        Ok(())
    }
}

/// A named savings goal. Its rate, if set, overrides the rate of any income
/// linked to it by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jar {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub target: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub yield_rate: Option<Decimal>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Jar {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("jar name is required"));
        }
        if let Some(rate) = self.yield_rate {
            if rate < Decimal::ZERO {
                return Err(Error::validation("jar yield rate cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Immutable fact: installment `installment` of `expense_id` was paid
/// early, possibly at a discount. Append-only; its presence marks that
/// installment settled regardless of invoice cutoff timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancePayment {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub expense_id: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub installment: u32,
    #[serde(deserialize_with = "lenient_decimal")]
    pub original_value: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount_paid: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount: Decimal,
    pub paid_on: NaiveDate,
}

impl AdvancePayment {
    pub fn validate(&self) -> Result<(), Error> {
        if self.expense_id.trim().is_empty() {
            return Err(Error::validation("advance payment needs an expense id"));
        }
        if self.amount_paid <= Decimal::ZERO {
            return Err(Error::validation("amount paid must be positive"));
        }
        Ok(())
    }
}

/// Singleton recurring rule interpreted per month by the aggregation
/// engine; never a list of transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryConfig {
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub note: Option<String>,
}

impl SalaryConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::validation("salary amount must be positive"));
        }
        Ok(())
    }
}

/// In-memory snapshot of every collection. All derived views are pure
/// functions of a `Ledger` plus an explicit evaluation date; nothing in the
/// engine mutates stored records.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub cards: Vec<Card>,
    pub jars: Vec<Jar>,
    pub advances: Vec<AdvancePayment>,
    pub salary: Option<SalaryConfig>,
}

impl Ledger {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_for(&self, expense: &Expense) -> Option<&Card> {
        expense.card_id.as_deref().and_then(|id| self.card(id))
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn jar(&self, id: &str) -> Option<&Jar> {
        self.jars.iter().find(|j| j.id == id)
    }
}

// Malformed stored numbers degrade to zero/absent instead of failing the
// whole snapshot.
fn decimal_from_value(v: &serde_json::Value) -> Decimal {
    match v {
        serde_json::Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn lenient_decimal<'de, D>(de: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    Ok(decimal_from_value(&v))
}

fn lenient_decimal_opt<'de, D>(de: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    if v.is_null() {
        return Ok(None);
    }
    Ok(Some(decimal_from_value(&v)))
}

fn lenient_u32<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    let n = match &v {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0) as u32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(n)
}

fn lenient_u32_opt<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    if v.is_null() {
        return Ok(None);
    }
    let n = match &v {
        serde_json::Value::Number(n) => n.as_u64().map(|x| x as u32),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(n)
}
