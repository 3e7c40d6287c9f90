//! Print an Argon2id hash for a password, for seeding accounts by hand.
//!
//! ```text
//! hash-password <password>
//! ```

use quizbank_api::auth::password::{check_password_length, hash_password};

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(password), None) = (args.next(), args.next()) else {
        eprintln!("usage: hash-password <password>");
        std::process::exit(2);
    };

    if let Err(msg) = check_password_length(&password) {
        eprintln!("{msg}");
        std::process::exit(1);
    }

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("hashing failed: {e}");
            std::process::exit(1);
        }
    }
}
