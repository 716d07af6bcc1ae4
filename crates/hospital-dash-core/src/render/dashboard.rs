//! Dashboard panel: counters, upcoming surgeries, low-stock supplies.

use super::{escape, RenderContext};
use crate::dashboard::DashboardSummary;
use crate::dispatch::Action;
use crate::format::{day_label, format_day_str};
use crate::models::{Supply, Surgery};

pub fn dashboard_panel(summary: &DashboardSummary, ctx: &RenderContext) -> String {
    let counter = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |n| n.to_string());

    let upcoming = match &summary.surgeries {
        Some(overview) if !overview.upcoming.is_empty() => overview
            .upcoming
            .iter()
            .map(|s| upcoming_item(s, ctx))
            .collect(),
        Some(_) => r#"<div class="no-data">No upcoming surgeries</div>"#.to_string(),
        None => String::new(),
    };

    let low_stock = match &summary.stock {
        Some(overview) if !overview.low_stock.is_empty() => {
            overview.low_stock.iter().map(low_stock_item).collect()
        }
        Some(_) => r#"<div class="no-data">No low stock items</div>"#.to_string(),
        None => String::new(),
    };

    format!(
        r##"<div class="stats-cards">
    <div class="stat-card"><i class="fas fa-user-injured"></i><h3 id="totalPatients">{patients}</h3><p>Total Patients</p></div>
    <div class="stat-card"><i class="fas fa-procedures"></i><h3 id="totalSurgeries">{surgeries}</h3><p>Total Surgeries</p></div>
    <div class="stat-card"><i class="fas fa-calendar-check"></i><h3 id="upcomingSurgeries">{upcoming_count}</h3><p>Upcoming Surgeries</p></div>
    <div class="stat-card"><i class="fas fa-exclamation-triangle"></i><h3 id="lowStockSupplies">{low_count}</h3><p>Low Stock Supplies</p></div>
</div>
<div class="dashboard-panels">
    <div class="panel">
        <div class="panel-header"><h3>Upcoming Surgeries</h3><a href="#" id="viewAllSurgeries" {view_surgeries}>View All</a></div>
        <div id="upcomingSurgeriesList">{upcoming}</div>
    </div>
    <div class="panel">
        <div class="panel-header"><h3>Low Stock Items</h3><a href="#" id="viewAllSupplies" {view_supplies}>View All</a></div>
        <div id="lowStockItemsList">{low_stock}</div>
    </div>
</div>"##,
        patients = counter(summary.total_patients),
        surgeries = counter(summary.surgeries.as_ref().map(|s| s.total)),
        upcoming_count = counter(summary.surgeries.as_ref().map(|s| s.upcoming_count)),
        low_count = counter(summary.stock.as_ref().map(|s| s.low_stock_count)),
        view_surgeries = Action::ViewAllSurgeries.data_attrs(),
        upcoming = upcoming,
        view_supplies = Action::ViewAllSupplies.data_attrs(),
        low_stock = low_stock,
    )
}

fn upcoming_item(surgery: &Surgery, ctx: &RenderContext) -> String {
    let when = surgery
        .scheduled_day()
        .map(|day| day_label(day, ctx.today))
        .unwrap_or_else(|| format_day_str(&surgery.scheduled_date));
    format!(
        r#"<div class="surgery-item">
    <div class="surgery-details">
        <h4>{}</h4>
        <p><i class="fas fa-user"></i> {}</p>
        <p><i class="fas fa-user-md"></i> Dr. {}</p>
        <p><i class="fas fa-calendar-day"></i> {}</p>
        <p><i class="fas fa-clock"></i> {}</p>
    </div>
    <div class="surgery-actions"><button type="button" class="btn btn-sm" {}>Details</button></div>
</div>"#,
        escape(&surgery.surgery_type),
        escape(&surgery.patient_name),
        escape(&surgery.doctor_name),
        escape(&when),
        escape(&surgery.time_window()),
        Action::ViewSurgery(surgery.id).data_attrs()
    )
}

/// Width of the stock bar; a missing maximum draws an empty bar.
pub fn stock_bar_width(supply: &Supply) -> i64 {
    supply.stock_percentage().unwrap_or(0)
}

fn low_stock_item(supply: &Supply) -> String {
    let unit = escape(&supply.unit);
    format!(
        r#"<div class="supply-item">
    <div class="supply-details">
        <h4>{}</h4>
        <p><i class="fas fa-box"></i> Current Stock: {} {}</p>
        <div class="stock-bar"><div class="stock-level" style="width: {}%;"></div></div>
        <p class="stock-status"><i class="fas fa-exclamation-triangle"></i> Below minimum stock level ({} {})</p>
    </div>
    <div class="supply-actions"><button type="button" class="btn btn-sm" {}>Restock</button></div>
</div>"#,
        escape(&supply.name),
        supply.quantity,
        unit,
        stock_bar_width(supply),
        supply.min_stock_level,
        unit,
        Action::Restock(supply.id).data_attrs()
    )
}
