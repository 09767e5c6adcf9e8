//! Command-line surface of the `dispatch` binary.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use dispatch_core::CustomerDetails;

#[derive(Debug, Parser)]
#[command(name = "dispatch", version, about = "Paint dispatch billing terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./dispatch.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or search the product catalog
    Products(ProductsArgs),
    /// Price a cart without submitting it
    Quote(QuoteArgs),
    /// Submit an order, issue the invoice and save its PDF
    Bill(BillArgs),
    /// Download the PDF of an already issued invoice
    Invoice(InvoiceArgs),
    /// Show the local sales history
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// SKU or name fragment
    pub query: Option<String>,

    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Cart line as SKU=QTY, repeatable
    #[arg(long = "item", value_name = "SKU=QTY", required = true)]
    pub items: Vec<ItemArg>,

    /// Customer state code for the CGST/SGST or IGST split
    #[arg(long)]
    pub state_code: Option<String>,
}

#[derive(Debug, Args)]
pub struct BillArgs {
    /// Cart line as SKU=QTY, repeatable
    #[arg(long = "item", value_name = "SKU=QTY", required = true)]
    pub items: Vec<ItemArg>,

    #[command(flatten)]
    pub customer: CustomerArgs,

    /// Ask the backend to email the invoice to the customer
    #[arg(long)]
    pub email_invoice: bool,

    /// Where to save the PDF (overrides `output_dir`)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CustomerArgs {
    /// Customer name (required)
    #[arg(long = "name", default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub gstin: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Defaults to the configured state code
    #[arg(long, default_value = "")]
    pub state_code: String,
}

impl From<CustomerArgs> for CustomerDetails {
    fn from(args: CustomerArgs) -> Self {
        CustomerDetails {
            name: args.name,
            address: args.address,
            gstin: args.gstin,
            phone: args.phone,
            email: args.email,
            state_code: args.state_code,
        }
    }
}

#[derive(Debug, Args)]
pub struct InvoiceArgs {
    /// Order id returned when the order was created
    pub order_id: i64,

    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Only lines of this order
    #[arg(long = "order")]
    pub order_id: Option<i64>,
}

/// One `--item SKU=QTY` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub sku: String,
    pub quantity: i64,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sku, quantity) = s
            .split_once('=')
            .ok_or_else(|| format!("expected SKU=QTY, got '{s}'"))?;

        let sku = sku.trim();
        if sku.is_empty() {
            return Err(format!("missing SKU in '{s}'"));
        }

        let quantity = quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("quantity in '{s}' is not a whole number"))?;

        Ok(ItemArg {
            sku: sku.to_string(),
            quantity,
        })
    }
}
