//! Line comment example
//!
//! Opens a file from the command line (or a built-in snippet), toggles line comments on the whole
//! document and prints the result.

use editor_commands::{EditorSession, SyntaxSet};

fn main() {
    let mut session = match std::env::args().nth(1) {
        Some(path) => match EditorSession::open(&path) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => {
            let mut session = EditorSession::new("def main():\n    print(\"hi\")\n\nmain()\n");
            let python = SyntaxSet::builtin().match_filename("demo.py").clone();
            session.doc_mut().set_syntax(python);
            session
        }
    };

    println!("language: {}", session.doc().syntax().name);
    match session.doc().line_comment() {
        Some(token) => println!("comment token: {token}\n"),
        None => println!("no line comment token; toggling is a no-op\n"),
    }

    session.perform("doc:select-all").unwrap();
    session.perform("doc:toggle-line-comments").unwrap();
    println!("{}", session.doc().text());

    session.perform("doc:select-all").unwrap();
    session.perform("doc:toggle-line-comments").unwrap();
    println!("{}", session.doc().text());
}
