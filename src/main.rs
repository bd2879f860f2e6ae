use std::{env, io};
use io::{BufRead, Write};

use ansi_term::Colour::{Blue, Red};
use wtag::{Map, Name, NamedUnion, Value};

// ----------------------------------------------------------------------------

/// Reads lines of the form `Member arg ...`, constructs the tagged value, and
/// reports which case of a [`NamedUnion`] it is dispatched to.
pub struct Repl {
    /// The union whose members may be constructed.
    pub union: NamedUnion,

    /// One handler per member, each describing its payload.
    pub handlers: Value,

    /// `true` once the input is exhausted.
    pub is_complete: bool,
}

impl Repl {
    pub fn new(union: NamedUnion) -> Self {
        let handlers: Map<Value> = union.names().map(|name| {
            let label = name.clone();
            let handler = Value::function(move |args| {
                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                Ok(format!("{} with payload [{}]", label, args.join(", ")).into())
            });
            (name.clone(), handler)
        }).collect();
        Self {union, handlers: handlers.into(), is_complete: false}
    }

    /// Parses a word as an `Int`, `Float` or `Str`.
    ///
    /// Only words made of digits, signs, `.` and exponents are numbers, so
    /// `nan` and `inf` stay strings.
    fn parse_arg(word: &str) -> Value {
        if let Ok(i) = word.parse::<i64>() { return i.into(); }
        let is_numeric = word.bytes().any(|b| b.is_ascii_digit())
            && word.bytes().all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'));
        if is_numeric {
            if let Ok(f) = word.parse::<f64>() { return f.into(); }
        }
        word.into()
    }

    /// Prompt for a command and run it.
    pub fn command(&mut self, input: &mut impl BufRead, output: &mut impl Write)
    -> io::Result<()> {
        write!(output, "{}> ", self.union.union())?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            self.is_complete = true;
            return Ok(());
        }
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else { return Ok(()); };
        let result = match self.union.get(name) {
            Some(tag) => {
                let value = tag.wrap(words.map(Self::parse_arg));
                self.union.named_switch(&value, &self.handlers, None)
                    .map(|v| v.str().map_or_else(|| v.to_string(), |s| s.to_string()))
            },
            None => Err(wtag::Error::InvalidArgument(format!("{} is not in this union", name))),
        };
        match result {
            Ok(text) => writeln!(output, "{}", Blue.paint(text)),
            Err(e) => writeln!(output, "{}", Red.paint(e.to_string())),
        }
    }
}

// ----------------------------------------------------------------------------

fn main() -> io::Result<()> {
    let mut names: Vec<Name> = env::args().skip(1).map(Name::from).collect();
    if names.is_empty() { names = vec!["Circle".into(), "Square".into()]; }
    let union = match NamedUnion::new(names) {
        Ok(union) => union,
        Err(e) => {
            eprintln!("{}", Red.paint(e.to_string()));
            std::process::exit(2);
        },
    };
    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let mut repl = Repl::new(union);
    while !repl.is_complete {
        repl.command(&mut input, &mut output)?;
    }
    Ok(())
}

// ----------------------------------------------------------------------------
