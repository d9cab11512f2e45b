//! Point-buy example: fill the standard sheet the way the form does
//!
//! This example demonstrates:
//! - Starting a form from the standard rules
//! - Proposing values with increment controls and typed input
//! - Handling rejections and the exact-spend submission gate
//!
//! Run with `RUST_LOG=debug` to see every decision.

use pointbuy::record::format_modifier;
use pointbuy::*;

fn print_form(form: &PointBuy) {
    for (stat, value) in form.allocation().iter() {
        println!("  {:<10} {:>3}", stat, format_modifier(value));
    }
    println!("  remaining: {}", form.remaining());
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut form = PointBuy::new(PointBuyRules::standard())?;
    let strength = StatId::from_str(StatId::STRENGTH);
    let agility = StatId::from_str(StatId::AGILITY);
    let spirit = StatId::from_str(StatId::SPIRIT);

    println!("=== Fresh sheet ===");
    print_form(&form);

    println!("\nTyping 99 into strength:");
    match form.propose(&strength, 99) {
        Ok(accepted) => println!(
            "  accepted {} (typed {:?}), cost {}",
            accepted.value, accepted.clamped_from, accepted.cost
        ),
        Err(rejection) => println!("  rejected: {}", rejection),
    }

    println!("\nClicking + on agility three times:");
    for _ in 0..3 {
        form.increment(&agility).ok();
    }
    print_form(&form);

    println!("\nClicking + on spirit until refused:");
    while form.can_increment(&spirit) {
        form.increment(&spirit).ok();
    }
    if let Err(rejection) = form.increment(&spirit) {
        println!("  {}", rejection);
    }
    print_form(&form);

    println!("\nSubmitting:");
    match form.submit() {
        Ok(stats) => {
            let record = CharacterRecord::new("Unnamed", stats);
            println!("{}", record.to_json()?);
        }
        Err(rejection) => println!("  {}", rejection),
    }

    Ok(())
}
