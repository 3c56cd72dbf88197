use std::io::{self, BufRead, Write};

mod session;

use session::{Outcome, Session};

fn main() {
    // Cargar .env si existe (p. ej. MOEBIUS_PROMPT)
    let _ = dotenvy::dotenv();
    let prompt = std::env::var("MOEBIUS_PROMPT").unwrap_or_else(|_| "memorized-moebius > ".to_string());

    println!("You're now in a sandbox where `m` is a memorized moebius object.");

    let mut session = match Session::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[moebius-repl] init error: {e}");
            std::process::exit(5);
        }
    };

    let stdin = io::stdin();
    let mut quit = false;
    loop {
        print!("\n{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("[moebius-repl] read error: {e}");
                std::process::exit(5);
            }
        }

        session.eval_with(&line, |outcome| match outcome {
            Ok(Outcome::Print(text)) => println!("{text}"),
            Ok(Outcome::Quit) => quit = true,
            Ok(Outcome::Empty) => {}
            Err(e) => eprintln!("error: {e}"),
        });
        if quit {
            break;
        }
    }
}
