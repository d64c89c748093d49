use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::api::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::analytics::{AnalyticsKind, TimeUnit};
use crate::domain::cart::CartError;
use crate::domain::ids::{BusinessId, OrderId, ProductId, VariantId};
use crate::domain::order::{CheckoutError, OrderStatus};
use crate::domain::payment::PaymentError;
use crate::domain::wallet::WalletError;

pub mod commands;
pub mod render;

pub use commands::run;

// ============================================================================
// Command Line Interface
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "marketplace", version, about = "Marketplace client: catalog, checkout, orders and wallet")]
pub struct Cli {
    #[command(flatten)]
    pub config: ClientConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a business's products
    Products {
        #[arg(long)]
        business: BusinessId,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one product with its variants
    Product { id: ProductId },
    /// List businesses
    Businesses {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Build a cart from the given lines and place the order
    Checkout(CheckoutArgs),
    /// Order history and status changes
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
    /// Wallet balance and movements
    Wallet {
        #[command(subcommand)]
        command: WalletCommand,
    },
    /// Chart data for a business
    Analytics {
        #[arg(value_enum)]
        kind: AnalyticsKind,
        #[arg(long)]
        business: BusinessId,
        #[arg(long, value_enum, default_value_t = TimeUnit::Week)]
        unit: TimeUnit,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
    /// Keep loading until the last page
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CheckoutArgs {
    /// Business the order is placed for
    #[arg(long)]
    pub business: BusinessId,
    /// Supplier for lines that do not name their own
    #[arg(long)]
    pub supplier: BusinessId,
    /// Cart line as VARIANT:QTY:PRICE, optionally suffixed with @SUPPLIER
    #[arg(long = "line", required = true)]
    pub lines: Vec<LineSpec>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_enum, default_value_t = PaymentChoice::Cash)]
    pub payment: PaymentChoice,
    /// Mobile money phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Mobile money provider (MTN, ORANGE, MOOV, WAVE)
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentChoice {
    Cash,
    Stripe,
    MobileMoney,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// Your orders, or a business's with --business
    List {
        #[arg(long)]
        business: Option<BusinessId>,
        #[arg(long)]
        status: Option<OrderStatus>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show { id: OrderId },
    Cancel {
        id: OrderId,
        #[arg(long)]
        reason: Option<String>,
    },
    SetStatus {
        id: OrderId,
        status: OrderStatus,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Re-fetch an order until it reaches a final status
    Watch {
        id: OrderId,
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
        #[arg(long, default_value_t = 60)]
        max_polls: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Balance and latest transactions
    Show,
    History {
        #[command(flatten)]
        page: PageArgs,
    },
    Deposit {
        amount: Decimal,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        provider: Option<String>,
    },
    Withdraw {
        amount: Decimal,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        provider: Option<String>,
    },
    Transfer {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        amount: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
}

/// One `--line` argument
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub variant_id: VariantId,
    pub quantity: u32,
    pub price: Decimal,
    pub supplier: Option<BusinessId>,
}

impl FromStr for LineSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (line, supplier) = match value.split_once('@') {
            Some((line, supplier)) if !supplier.trim().is_empty() => {
                (line, Some(BusinessId::new(supplier.trim())))
            }
            Some(_) => return Err(format!("missing supplier after '@' in {value:?}")),
            None => (value, None),
        };

        let mut parts = line.split(':');
        let (Some(variant), Some(quantity), Some(price), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected VARIANT:QTY:PRICE, got {value:?}"));
        };

        let variant = variant.trim();
        if variant.is_empty() {
            return Err(format!("missing variant id in {value:?}"));
        }
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("bad quantity in {value:?}: {error}"))?;
        let price = Decimal::from_str(price.trim()).map_err(|error| format!("bad price in {value:?}: {error}"))?;

        Ok(Self {
            variant_id: VariantId::new(variant),
            quantity,
            price,
            supplier,
        })
    }
}

/// Message shown to the person at the terminal
///
/// Domain errors already read as sentences; anything unexpected falls back
/// to the generic message while the details go to the log.
pub fn user_message(error: &anyhow::Error) -> String {
    if let Some(error) = error.downcast_ref::<ApiError>() {
        return error.user_message();
    }
    if let Some(error) = error.downcast_ref::<CheckoutError>() {
        return error.to_string();
    }
    if let Some(error) = error.downcast_ref::<CartError>() {
        return error.to_string();
    }
    if let Some(error) = error.downcast_ref::<PaymentError>() {
        return error.to_string();
    }
    if let Some(error) = error.downcast_ref::<WalletError>() {
        return error.to_string();
    }
    if let Some(error) = error.downcast_ref::<ConfigError>() {
        return error.to_string();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}
