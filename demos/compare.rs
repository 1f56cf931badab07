use std::time::Instant;

use dicebag::{Approx, Pool, PrintExt, Strategy};
use rand::Rng;

fn main() -> dicebag::Result<()> {
    env_logger::init();

    let start = Instant::now();
    let exact = Pool::new(5, 6).keep_highest(3)?;
    println!("exact, sorted rolls: {} ms", start.elapsed().as_millis());
    exact.print_table();

    let start = Instant::now();
    let ordered = Pool::new(5, 6)
        .strategy(Strategy::Ordered)
        .keep_highest(3)?;
    println!("exact, ordered rolls: {} ms", start.elapsed().as_millis());
    assert_eq!(exact, ordered);

    let start = Instant::now();
    let approx = Approx::default().eval(|rng| {
        let mut roll: Vec<i32> = (0..5).map(|_| rng.gen_range(1..=6)).collect();
        roll.sort_unstable();
        roll[2..].iter().sum::<i32>()
    });
    println!("monte-carlo: {} ms", start.elapsed().as_millis());
    approx.print_table();

    let start = Instant::now();
    let distinct = Pool::new(12, 6).distinct()?;
    println!(
        "distinct faces in 12d6: {} ms",
        start.elapsed().as_millis()
    );
    distinct.print_table();

    Ok(())
}
