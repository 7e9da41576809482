use ballast::chain::Chain;
use ballast::error::{ChainError, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    name = "ballast",
    version,
    about = "In-memory hash-linked chain of weighted blocks"
)]
struct Cli {
    /// Stop after appending this many blocks (default: run until EOF)
    #[arg(short = 'n', long)]
    limit: Option<u64>,

    /// Re-validate the whole chain after every append
    #[arg(long)]
    verify: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// The interactive loop: seed the chain with genesis, then read one weight
/// per line and append a block for it, printing the full chain after every
/// change. EOF ends the run; a non-integer line is reported and re-prompted.
fn run(cli: &Cli) -> Result<()> {
    let mut chain = Chain::genesis()?;
    println!("{}", chain.to_json_pretty()?);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut appended = 0u64;

    loop {
        if cli.limit.is_some_and(|n| appended >= n) {
            break;
        }

        print!("Enter a weight: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let weight = match parse_weight(&line) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        chain.extend(weight)?;
        if cli.verify && !chain.validate()? {
            return Err(ChainError::Corruption(format!(
                "chain failed validation after block {}",
                chain.tip().index
            )));
        }
        println!("{}", chain.to_json_pretty()?);
        appended += 1;
    }

    Ok(())
}

fn parse_weight(line: &str) -> Result<i64> {
    let trimmed = line.trim();
    trimmed
        .parse()
        .map_err(|_| ChainError::WeightParse(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weight_trims_newline() {
        assert_eq!(parse_weight("42\n").unwrap(), 42);
        assert_eq!(parse_weight("  -7  \n").unwrap(), -7);
    }

    #[test]
    fn parse_weight_rejects_garbage() {
        assert!(matches!(
            parse_weight("heavy\n"),
            Err(ChainError::WeightParse(s)) if s == "heavy"
        ));
        assert!(parse_weight("").is_err());
    }
}
