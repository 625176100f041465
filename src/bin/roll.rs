use dice_expression::{DiceParser, Evaluate};
use log::info;
use std::io::{self, BufRead, Write};

fn parser() -> Result<DiceParser, Box<dyn std::error::Error>> {
    let mut parser = DiceParser::new();
    if let Ok(max) = std::env::var("DICE_MAXIMUM_COUNT") {
        parser.set_maximum_dice_count(Some(max.trim().parse()?));
    }
    Ok(parser)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let parser = parser()?;
    info!("maximum dice count: {:?}", parser.maximum_dice_count());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if !args.is_empty() {
        let expr = parser.parse(&args.join(" "))?;
        let result = expr.roll();
        info!("{} rolled {}", expr, result);
        println!("{}", result.value());
        return Ok(());
    }

    // Without arguments, roll one expression per line of stdin.
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            match parser.parse(&line) {
                Ok(expr) => println!("{}", expr.roll()),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
