use chrono::{Datelike, Local};
use sugar_updater::contract_roll::compute_front_three;

fn main() {
    let today = Local::now().date_naive();
    println!("Front-month sugar contracts for {}:", today);

    match compute_front_three(today.month(), today.year()) {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("  {}", symbol);
            }
        }
        Err(e) => {
            println!("Error - {}", e);
        }
    }
}
