//! A small REPL over the sherlog library crate.
//!
//! Loads a program file into a knowledge base and prompts for queries.

use std::env;
use std::io::{self, stdout, Write};
use std::process;

use sherlog::*;

/// The `query` binary loads a program and prompts for queries.
///
/// # Usage
/// ```text
/// cargo run -- demos/family.slg
/// ```
/// The program will prompt for a query:
/// ```text
/// Loading file: demos/family.slg
/// ?- ancestor(tom, ?d).
/// ?d = mary
/// ```
/// Press Enter for the next solution, until `No more.`.
fn main() {

    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("\nSherlog - a Prolog-style inference engine\n");
        println!("Usage:");
        println!("cargo run -- demos/family.slg\n");
        return;
    }

    let file_path = &args[1];
    println!("Loading file: {}", file_path);

    let kb = KnowledgeBase::new();
    match load_file(&kb, file_path) {
        Ok(count) => { println!("{} clauses loaded.", count); },
        Err(err) => {
            println!("{}", err);
            process::exit(1);
        },
    }

    loop {

        print!("?- ");
        let _ = stdout().flush();
        let mut input = String::new();
        io::stdin().read_line(&mut input).expect("Enter a query.");

        let mut input = input.trim().to_string();
        if input.is_empty() { break; }
        // A final period is optional at the prompt.
        if input.ends_with('.') { input.pop(); }

        match kb.query_str(&input, QueryOptions::default()) {
            Ok(mut solutions) => {
                loop {
                    let line = match solutions.next() {
                        Some(bindings) => format_bindings(&bindings),
                        None => "No more.".to_string(),
                    };
                    print!("{} ", line);
                    let _ = stdout().flush();
                    if line == "No more." { println!(); break; }
                    let mut pause = String::new();
                    io::stdin().read_line(&mut pause).expect("");
                    if pause.trim() == ";" || pause.trim().is_empty() {
                        continue;
                    }
                    break;
                }
            },
            Err(err) => { println!("{}", err); },
        } // match

    } // loop

} // main()
