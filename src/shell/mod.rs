//! Interactive command shell around the scanner

pub mod timer;

use crate::core::types::{
    Comparison, MemoryResult, ResultSet, ScanOptions, TypeFilter, ValueBundle, ValueType,
};
use crate::memory::Scanner;
use crate::shell::timer::ScopeTimer;
use std::io::{self, BufRead, Write};

const SCAN_DURATION: &str = "scan duration: ";
const NEEDS_INITIAL_SCAN: &str = "do an initial scan first";

/// Command table shown by `help`: name, argument description, description
const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "", "show help"),
    ("quit", "", "quit the program"),
    ("=", "[value]", "find matching values"),
    (">", "[value]", "find values higher than the given value"),
    ("<", "[value]", "find values lower than the given value"),
    (
        ">=",
        "[value]",
        "find values higher than or equal to the given value",
    ),
    (
        "<=",
        "[value]",
        "find values lower than or equal to the given value",
    ),
    ("=", "", "find values that have not changed since last scan"),
    ("!", "", "find values that have changed since last scan"),
    (
        "repeat",
        "[!|=] [count]",
        "repeat a comparison multiple times in a row",
    ),
    (
        "repeat",
        "[!|=]",
        "repeat a comparison until the result count stops changing",
    ),
    ("list", "", "list out all results found so far"),
    ("set", "[index] [value]", "set a new value for a result"),
    ("setall", "[value]", "set a new value for all results"),
    ("types", "", "list currently enabled types"),
    (
        "types",
        "[i32|i64|f32|f64 ...|all]",
        "specify the types that should be searched for",
    ),
    ("reset", "", "clear the result list and start a new search"),
];

struct Session {
    opts: ScanOptions,
    scanner: Scanner,
    filter: TypeFilter,
    results: ResultSet,
    first_search: bool,
}

/// Runs the interactive loop until `quit` or end of input.
pub fn run(opts: ScanOptions) -> MemoryResult<()> {
    let scanner = Scanner::new(opts.pid, &opts)?;
    let mut session = Session {
        opts,
        scanner,
        filter: TypeFilter::default(),
        results: ResultSet::new(),
        first_search: true,
    };

    println!("type 'help' for a list of commands");

    let stdin = io::stdin();
    loop {
        print!(" > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = tokens.split_first() else {
            continue;
        };

        match (command, args) {
            ("help", &[]) => print_help(),
            ("quit", &[]) => break,
            ("reset", &[]) => session.reset(),
            ("list", &[]) => session.list(),
            ("types", &[]) => session.show_types(),
            ("types", names) => session.set_types(names),
            ("set", &[index, value]) => session.set_one(index, value),
            ("setall", &[value]) => session.set_all(value),
            ("repeat", &[op]) => session.repeat_until_stable(op),
            ("repeat", &[op, count]) => session.repeat_counted(op, count),
            ("=", &[]) => session.change_refine(true),
            ("!", &[]) => session.change_refine(false),
            (op, &[value]) => match Comparison::from_token(op) {
                Some(comparison) => session.relational(comparison, value),
                None => println!("unknown command"),
            },
            _ => println!("unknown command"),
        }
    }

    Ok(())
}

fn print_help() {
    for (name, args, description) in COMMANDS {
        if args.is_empty() {
            println!("{name:<32}{description}");
        } else {
            println!("{:<32}{description}", format!("{name} {args}"));
        }
    }
}

/// Maps a repeat/change token to `expected_unchanged`
fn change_token(token: &str) -> Option<bool> {
    match token {
        "=" => Some(true),
        "!" => Some(false),
        _ => None,
    }
}

/// Turns a `types` argument list into a new filter, validating every name
/// before anything changes.
fn selection_to_filter(names: &[&str]) -> Result<TypeFilter, String> {
    if names.first() == Some(&"all") {
        return Ok(TypeFilter::default());
    }

    let mut selected = Vec::new();
    for name in names {
        match name.parse::<ValueType>() {
            Ok(ty) => selected.push(ty),
            Err(_) => return Err((*name).to_string()),
        }
    }

    let mut filter = TypeFilter::none();
    for ty in selected {
        filter.set(ty, true);
    }
    Ok(filter)
}

impl Session {
    fn print_result_count(&self) {
        println!("results: {}", self.results.count());
    }

    fn relational(&mut self, comparison: Comparison, literal: &str) {
        let value = match ValueBundle::try_parse(literal) {
            Ok(value) => value,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        let _timer = ScopeTimer::new(SCAN_DURATION);
        let outcome = if self.first_search {
            self.scanner.scan(&self.opts, &self.filter, &value, comparison)
        } else {
            self.scanner.refine_relational(&value, &self.results, comparison)
        };

        match outcome {
            Ok(results) => {
                self.results = results;
                self.first_search = false;
                self.print_result_count();
            }
            Err(e) => println!("{e}"),
        }
    }

    /// One change-refine pass; reports the outcome and returns whether the
    /// pass succeeded.
    fn change_pass(&mut self, expected_unchanged: bool) -> bool {
        let _timer = ScopeTimer::new(SCAN_DURATION);
        match self.scanner.refine_change(&self.results, expected_unchanged) {
            Ok(results) => {
                self.results = results;
                self.print_result_count();
                true
            }
            Err(e) => {
                println!("{e}");
                false
            }
        }
    }

    fn change_refine(&mut self, expected_unchanged: bool) {
        if self.first_search {
            println!("{NEEDS_INITIAL_SCAN}");
            return;
        }
        self.change_pass(expected_unchanged);
    }

    fn repeat_counted(&mut self, op: &str, count: &str) {
        if self.first_search {
            println!("{NEEDS_INITIAL_SCAN}");
            return;
        }
        let Some(expected_unchanged) = change_token(op) else {
            println!("unimplemented repeat comparison");
            return;
        };
        let count: i32 = match count.parse() {
            Ok(count) => count,
            Err(_) => {
                println!("invalid argument: {count}");
                return;
            }
        };

        let mut previous = self.results.count();
        let mut same_result_streak = 0u8;

        for _ in 0..count.max(1) {
            if !self.change_pass(expected_unchanged) {
                return;
            }

            if self.results.count() == previous {
                same_result_streak += 1;
            } else {
                same_result_streak = 0;
            }
            previous = self.results.count();

            if same_result_streak >= 3 {
                println!("stopping the repeat check as it doesn't seem to help");
                break;
            }
        }
    }

    fn repeat_until_stable(&mut self, op: &str) {
        if self.first_search {
            println!("{NEEDS_INITIAL_SCAN}");
            return;
        }
        let Some(expected_unchanged) = change_token(op) else {
            println!("unimplemented repeat comparison");
            return;
        };

        let mut previous = usize::MAX;
        while previous != self.results.count() {
            previous = self.results.count();
            if !self.change_pass(expected_unchanged) {
                return;
            }
        }
    }

    fn list(&self) {
        let mut counter = 0usize;
        for (ty, hits) in self.results.sequences() {
            for candidate in hits {
                print!("[{counter}] {:5x} | {} | ", candidate.offset, ty.label());
                counter += 1;

                let shown = match ty {
                    ValueType::I32 => self
                        .scanner
                        .read_current::<i32>(candidate)
                        .map(|v| v.to_string()),
                    ValueType::I64 => self
                        .scanner
                        .read_current::<i64>(candidate)
                        .map(|v| v.to_string()),
                    ValueType::F32 => self
                        .scanner
                        .read_current::<f32>(candidate)
                        .map(|v| v.to_string()),
                    ValueType::F64 => self
                        .scanner
                        .read_current::<f64>(candidate)
                        .map(|v| v.to_string()),
                };
                match shown {
                    Ok(value) => println!("{value}"),
                    Err(e) => println!("<{e}>"),
                }
            }
        }
    }

    fn set_one(&mut self, index: &str, literal: &str) {
        let index: usize = match index.parse() {
            Ok(index) => index,
            Err(_) => {
                println!("invalid argument: {index}");
                return;
            }
        };
        let value = match ValueBundle::try_parse(literal) {
            Ok(value) => value,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        match self.results.at_mut(index) {
            Some(candidate) => {
                if let Err(e) = self.scanner.set(candidate, &value) {
                    println!("{e}");
                }
            }
            None => println!("no result with index {index}"),
        }
    }

    fn set_all(&mut self, literal: &str) {
        let value = match ValueBundle::try_parse(literal) {
            Ok(value) => value,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        let Session {
            scanner, results, ..
        } = self;
        for (_, hits) in results.sequences_mut() {
            for candidate in hits.iter_mut() {
                if let Err(e) = scanner.set(candidate, &value) {
                    println!("{e}");
                }
            }
        }
    }

    fn show_types(&self) {
        for ty in self.filter.enabled() {
            println!("{ty}");
        }
    }

    fn set_types(&mut self, names: &[&str]) {
        match selection_to_filter(names) {
            Ok(filter) => self.filter = filter,
            Err(name) => println!("invalid type: {name}"),
        }
    }

    fn reset(&mut self) {
        self.results.clear();
        self.first_search = true;

        match Scanner::new(self.opts.pid, &self.opts) {
            Ok(scanner) => self.scanner = scanner,
            Err(e) => println!("{e}"),
        }
    }
}
