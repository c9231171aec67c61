//! # photo-guess CLI
//!
//! Command-line interface for the photo date game.
//!
//! ## Usage
//! ```bash
//! photo-guess play --folders folders.txt
//! photo-guess index folders.txt --name family
//! photo-guess play --cache family
//! ```

mod cli;

use photo_date_game::Result;

fn main() -> Result<()> {
    photo_date_game::init_tracing();
    cli::run()
}
