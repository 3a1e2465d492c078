//! Guided tour of optbind-core.
//!
//! Walks through the supported declaration styles and parses a canned
//! argument vector for each, printing the resulting option set as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optbind-demos --example tour
//! ```

use std::error::Error;

use optbind_core::{OptionDecl, Parsed, Schema, Slot};

type DemoResult = Result<(), Box<dyn Error>>;

fn main() -> DemoResult {
    simple()?;
    positionals()?;
    defaults()?;
    external_storage()?;
    switches()?;
    equals_and_shortcuts()?;
    vectors()?;
    required()?;
    help()?;
    Ok(())
}

fn show(title: &str, schema: &Schema, args: &[&str]) -> DemoResult {
    println!("=== {title} ===");
    println!("args: {}", args[1..].join(" "));
    match schema.parse(args.iter().copied()) {
        Ok(Parsed::Options(options)) => println!("{}", serde_json::to_string(&options)?),
        Ok(Parsed::Help(text)) => print!("{text}"),
        Err(err) => print!("{err}"),
    }
    println!();
    Ok(())
}

fn simple() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<i64>("opt1"))
        .option(OptionDecl::of::<String>("opt2"))
        .build()?;
    show("Simple options", &schema, &["tour", "--opt1", "12", "--opt2", "abc"])
}

fn positionals() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<i64>("opt1"))
        .option(OptionDecl::of::<String>("opt2"))
        .option(OptionDecl::of::<f64>("opt3"))
        .positionals(["opt2", "opt3"])
        .build()?;
    show("Positionals", &schema, &["tour", "abc", "1.23", "--opt1", "12"])
}

fn defaults() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::with_default("opt1", 3i64))
        .option(OptionDecl::with_default("opt2", String::from("abc")))
        .build()?;
    show("Defaults", &schema, &["tour"])
}

fn external_storage() -> DemoResult {
    let opt1 = Slot::new(0i64);
    let schema = Schema::builder()
        .option(OptionDecl::bound("opt1", &opt1))
        .build()?;
    show("External storage", &schema, &["tour", "--opt1", "42"])?;
    println!("slot now holds {}\n", opt1.get());
    Ok(())
}

fn switches() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::with_default("opt1", true))
        .option(OptionDecl::of::<bool>("a"))
        .option(OptionDecl::of::<bool>("b"))
        .option(OptionDecl::of::<bool>("c"))
        .option(OptionDecl::of::<bool>("d"))
        .build()?;
    show("Switches", &schema, &["tour", "--opt1", "0", "-abc", "-d=0"])
}

fn equals_and_shortcuts() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<i64>("opt1").alias("1"))
        .option(OptionDecl::of::<String>("opt2").alias("o"))
        .build()?;
    show("Shortcuts and '='", &schema, &["tour", "-1=12", "--opt2=abc"])?;
    show("Shortcuts", &schema, &["tour", "-1", "12", "-o", "abc"])
}

fn vectors() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<Vec<i64>>("opt1"))
        .option(OptionDecl::of::<Vec<String>>("files"))
        .positionals(["files"])
        .build()?;
    show(
        "Vectors",
        &schema,
        &["tour", "--opt1", "1", "--opt1=2", "a.txt", "b.txt"],
    )
}

fn required() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<i64>("opt1"))
        .option(OptionDecl::of::<String>("opt2"))
        .required(["opt1"])
        .build()?;
    show("Required (missing)", &schema, &["tour", "--opt2", "abc"])
}

fn help() -> DemoResult {
    let schema = Schema::builder()
        .option(OptionDecl::of::<i64>("opt1").alias("1"))
        .option(OptionDecl::of::<String>("opt2").alias("2"))
        .option(OptionDecl::of::<Vec<String>>("opt3"))
        .option(OptionDecl::of::<bool>("a"))
        .required(["opt1", "a"])
        .positionals(["opt1", "opt2"])
        .description(
            "This is a test program",
            [
                ("opt1", "Set the first option of our test program.\n second line"),
                ("opt2", "Set the second option of our test program."),
                ("opt3", "A vector of strings."),
            ],
        )
        .build()?;
    show("Help", &schema, &["./test_program", "--help"])
}
