//! Command-line interface: tokenize, reprint, or JSON-convert a file.

use clap::Parser as ClapParser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::parser::parse;
use crate::token::TokenType;
use crate::tokenize;

#[derive(ClapParser)]
#[command(name = "esparse")]
#[command(about = "Parse ECMAScript 2020 and print it back", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input file; stdin when omitted.
    pub file: Option<PathBuf>,

    /// Dump the token stream instead of parsing.
    #[arg(long)]
    pub tokens: bool,

    /// Re-emit the input as JSON (value subset only).
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the CLI.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if cli.tokens {
        for (tt, data) in tokenize(&source) {
            if tt == TokenType::Whitespace || tt == TokenType::LineTerminator {
                continue;
            }
            println!("{:?}\t{}", tt, data);
        }
        return Ok(());
    }

    let ast = match parse(&source) {
        Ok(ast) => ast,
        Err(err) => {
            eprintln!("{}", err.display_with_source(&source));
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", ast.to_json_string()?);
    } else {
        println!("{}", ast.to_js_string());
    }
    Ok(())
}
