//! Inventory command implementation.
//!
//! Loads a SKU file and evaluates a reorder / order-up-to policy pair,
//! printing the steady-state performance per SKU.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use quantops_inventory::dataset::{evaluate_policies, load_skus, SkuPerformance};
use quantops_inventory::policy::{
    LeadTimeCoverReorder, ReorderPolicy, UsageTieredOrderUpTo, UsageTieredReorder,
};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output};

/// Which reorder rule to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReorderRule {
    /// Tiered fraction of annual usage
    #[default]
    UsageTiered,
    /// Safety factor times lead-time demand cover
    LeadTimeCover,
}

/// Arguments for the inventory command.
#[derive(Args, Debug)]
pub struct InventoryArgs {
    /// SKU CSV file (columns: SKU, Total Usage, Unit Cost, Lead Time (days))
    #[arg(long)]
    pub file: String,

    /// Reorder rule
    #[arg(short, long, value_enum, default_value = "usage-tiered")]
    pub reorder: ReorderRule,

    /// Safety factor for the lead-time-cover rule
    #[arg(long, default_value = "1.4")]
    pub safety_factor: f64,

    /// Review pad in days for the lead-time-cover rule
    #[arg(long, default_value = "10")]
    pub review_pad_days: f64,
}

/// One output row per SKU.
#[derive(Debug, Serialize, Tabled)]
struct SkuRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "r")]
    reorder_point: i64,
    #[tabled(rename = "Q")]
    order_quantity: i64,
    #[tabled(rename = "Theta")]
    lead_time_demand: String,
    #[tabled(rename = "Service")]
    service_level: String,
    #[tabled(rename = "Fill Rate")]
    fill_rate: String,
    #[tabled(rename = "Backorders")]
    backorder_level: String,
    #[tabled(rename = "On Hand")]
    on_hand: String,
    #[tabled(rename = "Orders/Yr")]
    order_frequency: String,
}

impl From<&SkuPerformance> for SkuRow {
    fn from(perf: &SkuPerformance) -> Self {
        Self {
            sku: perf.sku.clone(),
            reorder_point: perf.reorder_point,
            order_quantity: perf.order_quantity,
            lead_time_demand: format!("{:.2}", perf.lead_time_demand),
            service_level: format!("{:.4}", perf.service_level),
            fill_rate: format!("{:.4}", perf.fill_rate),
            backorder_level: format!("{:.3}", perf.backorder_level),
            on_hand: format!("{:.2}", perf.on_hand_inventory),
            order_frequency: format!("{:.2}", perf.order_frequency),
        }
    }
}

/// Execute the inventory command.
pub fn execute(args: InventoryArgs, format: OutputFormat) -> Result<()> {
    let records = load_skus(&args.file)?;

    let tiered = UsageTieredReorder::default();
    let cover = LeadTimeCoverReorder {
        safety_factor: args.safety_factor,
        review_pad_days: args.review_pad_days,
    };
    let reorder: &dyn ReorderPolicy = match args.reorder {
        ReorderRule::UsageTiered => &tiered,
        ReorderRule::LeadTimeCover => &cover,
    };

    let performance = evaluate_policies(&records, reorder, &UsageTieredOrderUpTo::default())?;
    let rows: Vec<SkuRow> = performance.iter().map(SkuRow::from).collect();

    print_header(
        &format!("Inventory Performance ({})", reorder.name()),
        format,
    );
    print_output(&rows, format)
}
