use payment_history_rs::{Session, UploadBatch};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let files: Vec<String> = env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: parse_history <activity.csv>...");
        return Ok(());
    }

    let batch = files.iter().fold(UploadBatch::new(), |batch, file| batch.file(file));

    let mut session = Session::new();
    session.load(batch)?;

    println!("Merchants: {}\n", session.merchants().len());

    let view = session.view()?;
    for point in view.category_points().iter().take(10) {
        let txn = &point.detail.transaction;
        println!("{}", point.label);
        println!("  Name: {}", txn.name);
        println!("  Type: {}", txn.transaction_type);
        println!("  Amount: {} {}", txn.amount, txn.currency);
        println!("  Balance: {}", point.detail.cumulative_amount);
        println!();
    }

    if view.len() > 10 {
        println!("... and {} more transactions\n", view.len() - 10);
    }

    println!("Incoming: {}", view.summary.total_incoming);
    println!("Outgoing: {}", view.summary.total_outgoing);
    println!("Net:      {}", view.summary.net_amount);

    Ok(())
}
