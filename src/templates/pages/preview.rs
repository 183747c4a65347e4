use crate::domain::{DailyRow, ExpandedTable};
use maud::{html, Markup};

/// Rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 10;

pub struct PreviewVm<'a> {
    pub total_rows: usize,
    pub detail_count: usize,
    pub total_price: String,
    pub rows: &'a [DailyRow],
}

impl<'a> PreviewVm<'a> {
    pub fn from_table(table: &'a ExpandedTable) -> Self {
        let rows = table.rows();
        Self {
            total_rows: table.len(),
            detail_count: table.group_by_detail().len(),
            total_price: table
                .total_price()
                .map_or_else(|| "too large to display".to_string(), |t| format!("{t:.2}")),
            rows: &rows[..rows.len().min(PREVIEW_ROWS)],
        }
    }
}

pub fn preview_table(vm: &PreviewVm) -> Markup {
    html! {
        section class="card" {
            h3 { "Preview" }
            p {
                strong { (vm.total_rows) } " daily lines for "
                strong { (vm.detail_count) } " id detail(s), total "
                strong { (vm.total_price) } "."
            }

            table {
                thead {
                    tr {
                        th { "Id detail" }
                        th { "Date" }
                        th { "Tarif" }
                        th { "Actif" }
                        th { "Arrivée autorisée" }
                    }
                }
                tbody {
                    @for row in vm.rows {
                        tr {
                            td { (row.detail_id) }
                            td { (row.date.format("%Y-%m-%d")) }
                            td { (format!("{:.2}", row.daily_price)) }
                            td { (yes_no(row.active)) }
                            td { (yes_no(row.arrival_allowed)) }
                        }
                    }
                }
            }

            @if vm.total_rows > vm.rows.len() {
                p { "… and " (vm.total_rows - vm.rows.len()) " more lines." }
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "VRAI"
    } else {
        "FAUX"
    }
}
