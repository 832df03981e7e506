//! Print the GraphQL schema definition language.

use std::io::Write;

fn main() -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", users_graphql::graphql::sdl())
}
