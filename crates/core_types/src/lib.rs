//! Core domain types for the savings-records dashboard.
//!
//! This crate defines the shared data structures used across the web
//! client, the derived-view utilities, and the development API server.
//! All wire shapes are camelCase JSON; the deserializers here absorb the
//! inconsistencies the hosted backend has been observed emitting (bare
//! ids vs. embedded customer objects, numeric vs. string amounts,
//! `_id` vs. `id`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display label used when a record's customer reference does not
/// resolve to a known customer.
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Status labels for a customer plan.
///
/// The wire format is an open set of strings; anything unrecognized
/// lands in `Unknown` instead of failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerStatus {
    Active,
    Inactive,
    New,
    Paused,
    #[default]
    Unknown,
}

impl CustomerStatus {
    /// Parse a wire label, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "new" => Self::New,
            "paused" => Self::Paused,
            _ => Self::Unknown,
        }
    }

    /// Canonical wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::New => "new",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CustomerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CustomerStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Status labels for a single savings contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavingStatus {
    Paid,
    Missed,
    Pending,
    #[default]
    Unknown,
}

impl SavingStatus {
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "paid" => Self::Paid,
            "missed" => Self::Missed,
            "pending" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Missed => "missed",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SavingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SavingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SavingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Normalized reference from a savings record to its customer.
///
/// The backend sends either a bare id string or an embedded
/// `{_id, name}` object depending on whether the reference was
/// populated. Both forms normalize to this one shape on ingress so
/// nothing downstream branches on the wire variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerLink {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CustomerLink {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Name to render; falls back to a placeholder when the reference
    /// never resolved.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_CUSTOMER)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerLinkWire {
    Embedded {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
    Bare(String),
}

impl<'de> Deserialize<'de> for CustomerLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match CustomerLinkWire::deserialize(deserializer)? {
            CustomerLinkWire::Embedded { id, name } => Self { id, name },
            CustomerLinkWire::Bare(id) => Self { id, name: None },
        })
    }
}

/// Deserialize a money field leniently: numbers, numeric strings, and
/// garbage have all been observed on this field; anything unparseable
/// counts as zero rather than failing the whole collection.
pub fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64()
                    .and_then(|f| Decimal::try_from(f).ok())
                    .unwrap_or(Decimal::ZERO)
            }
        }
        serde_json::Value::String(s) => Decimal::from_str_exact(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    })
}

/// A customer of the daily-savings business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Timestamp of the customer's most recent activity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<DateTime<Utc>>,
    /// Agreed contribution per collection day.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub daily_amount: Decimal,
    /// Running total of collected contributions.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_saved: Decimal,
    #[serde(default)]
    pub days_active: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Customer {
    /// A freshly enrolled customer with no collection history.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        daily_amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            status: CustomerStatus::New,
            branch_id: None,
            branch_name: None,
            last_visit: None,
            daily_amount,
            total_saved: Decimal::ZERO,
            days_active: 0,
            start_date: None,
        }
    }

    /// Link pointing at this customer, carrying the display name.
    pub fn link(&self) -> CustomerLink {
        CustomerLink::new(self.id.clone(), Some(self.name.clone()))
    }
}

/// A single savings contribution entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "customerId")]
    pub customer: CustomerLink,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: SavingStatus,
}

impl SavingsRecord {
    pub fn new(
        id: impl Into<String>,
        customer: CustomerLink,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            customer,
            amount,
            date,
            status: SavingStatus::Paid,
        }
    }
}

/// A physical business location. Purely descriptive; records reference
/// branches only for display grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub employees: u32,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub established: String,
}

/// Format an amount in naira with thousands separators, keeping two
/// decimal places only when the amount has a fractional part.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) if frac.trim_end_matches('0').is_empty() => format!("{sign}₦{grouped}"),
        Some(frac) => format!("{sign}₦{grouped}.{frac:0<2}"),
        None => format!("{sign}₦{grouped}"),
    }
}
