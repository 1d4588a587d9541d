//! Test fixtures and dataset generators.

use std::fmt::Write;
use std::io::Write as _;

use insights_core::Table;
use tempfile::NamedTempFile;

/// Employees in the generated dataset.
pub const EMPLOYEE_COUNT: i64 = 25;

/// Monthly snapshots per employee, January through April 2024.
pub const MONTHS: u32 = 4;

/// Employee whose final snapshot has no leads.
pub const ZERO_LEAD_EMPLOYEE: i64 = 25;

/// Names containing "cam" in any case.
pub const CAM_NAMES: [&str; 2] = ["Camilla Ali", "Dana Camacho"];

const NAMES: [&str; EMPLOYEE_COUNT as usize] = [
    "Marcus Webb",
    "Priya Nair",
    "Camilla Ali",
    "Tomas Ruiz",
    "Hannah Cole",
    "Oliver Grant",
    "Sofia Marin",
    "Dana Camacho",
    "Liam Foster",
    "Aisha Bello",
    "Noah Park",
    "Grace Liu",
    "Ethan Brooks",
    "Maya Patel",
    "Lucas Reyes",
    "Zoe Turner",
    "Isaac Moreno",
    "Chloe Evans",
    "Jonah Weiss",
    "Leah Dunn",
    "Owen Harper",
    "Nina Petrov",
    "Caleb Stone",
    "Ruby Walsh",
    "Felix Ortega",
];

const HEADER: &str = "employee_id,employee_name,dated,created,lead_taken,tours_booked,applications,\
tours_per_lead,apps_per_tour,apps_per_lead,revenue_confirmed,revenue_pending,revenue_runrate,\
estimated_revenue,avg_deal_value_30_days,avg_close_rate_30_days,tours_in_pipeline,tours_scheduled,\
tours_pending,tours_cancelled,mon_text,mon_call,tue_text,tue_call,wed_text,wed_call,thur_text,\
thur_call,fri_text,fri_call,sat_text,sat_call,sun_text,sun_call";

/// Leads taken by `employee_id` in `month` (1-based).
pub fn leads(employee_id: i64, month: u32) -> i64 {
    if employee_id == ZERO_LEAD_EMPLOYEE && month == MONTHS {
        return 0;
    }
    10 + (employee_id * 3 + month as i64) % 15
}

/// Sum of `lead_taken` over every generated row.
pub fn total_leads() -> i64 {
    (1..=EMPLOYEE_COUNT)
        .flat_map(|id| (1..=MONTHS).map(move |month| leads(id, month)))
        .sum()
}

/// Generate the 25-employee, four-month dataset as CSV text.
pub fn sales_csv() -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for month in 1..=MONTHS {
        for id in 1..=EMPLOYEE_COUNT {
            let lead = leads(id, month);
            let tours = lead / 2;
            let apps = tours / 2;
            let confirmed = apps * 1500 + id * 100;
            let pending = (id % 5) * 400 + month as i64 * 50;
            let ratio = |num: i64, den: i64| {
                if den == 0 {
                    0.0
                } else {
                    num as f64 / den as f64
                }
            };
            let text = (id + month as i64) % 7;
            let call = (id * month as i64) % 4;

            let _ = writeln!(
                csv,
                "{id},{name},2024-{month:02}-15,2023-06-01,{lead},{tours},{apps},\
                 {tpl:.2},{apt:.2},{apl:.2},{confirmed},{pending},{runrate},\
                 {estimated},{deal},{close},{pipeline},{scheduled},\
                 {tours_pending},{cancelled},{text},{call},{text},{call},{text},{call},{text},\
                 {call},{text},{call},0,0,0,0",
                name = NAMES[(id - 1) as usize],
                tpl = ratio(tours, lead),
                apt = ratio(apps, tours),
                apl = ratio(apps, lead),
                runrate = confirmed * 12,
                estimated = confirmed + pending,
                deal = 1200 + id * 10,
                close = 10 + id % 20,
                pipeline = id % 6,
                scheduled = month,
                tours_pending = id % 3,
                cancelled = id % 2,
            );
        }
    }
    csv
}

/// The generated dataset parsed into a table.
pub fn sales_table() -> Table {
    Table::from_reader(sales_csv().as_bytes()).expect("fixture CSV must parse")
}

/// Write `contents` to a temporary CSV file.
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}
