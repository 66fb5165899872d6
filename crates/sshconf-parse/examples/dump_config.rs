use std::io::Read;

use sshconf_parse::{Parser, Scanner};

fn main() {
    let (name, source) = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read(&path).unwrap();
            (path, source)
        }
        None => {
            let mut source = Vec::new();
            std::io::stdin().read_to_end(&mut source).unwrap();
            ("<stdin>".to_string(), source)
        }
    };

    println!("=== Tokens ===");
    for token in Scanner::new(&source) {
        println!("{:?}", token);
    }

    println!("\n=== Config ===");
    match Parser::new(&source).parse() {
        Ok(config) => println!("{:#?}", config),
        Err(err) => {
            eprint!("{}", err.render(&name, &source));
            std::process::exit(1);
        }
    }
}
