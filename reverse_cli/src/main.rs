// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::{Parser as ClapParser, Subcommand};
use reverse_vm::ecmascript::{
    abstract_operations::operations_on_objects::{
        create_data_property, integrity::Frozen, set_integrity_level,
    },
    builtins::{ArgumentsList, Array, ArrayPrototype, ordinary::OrdinaryObject},
    execution::{Agent, JsResult, Options},
    types::{InternalMethods, PropertyKey, Value},
};
use sonic_rs::{JsonContainerTrait, JsonValueTrait};

/// Reverses JSON arrays with Array.prototype.reverse
#[derive(Debug, ClapParser)] // requires `derive` feature
#[command(name = "reverse")]
#[command(about = "Reverses JSON arrays with Array.prototype.reverse", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct Input {
    /// The receiver, as JSON. Arrays become Array objects, anything else is
    /// passed through as the this value.
    json: String,

    /// Indexes to delete from the array before running, e.g. `--holes 1,3`
    #[arg(long, value_delimiter = ',')]
    holes: Vec<u32>,

    /// Freeze the array before running
    #[arg(long)]
    frozen: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reverses the input and prints the result
    Reverse {
        #[command(flatten)]
        input: Input,

        /// Logs which algorithm handled the call
        #[arg(short, long)]
        verbose: bool,

        /// Never take the packed fast path
        #[arg(short, long)]
        generic: bool,
    },

    /// Prints the elements kind of an array input and whether the packed
    /// fast path would accept it
    Classify {
        #[command(flatten)]
        input: Input,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    match args.command {
        Command::Reverse {
            input,
            verbose,
            generic,
        } => {
            let mut agent = Agent::new(Options {
                print_internals: verbose,
                disable_array_fast_paths: generic,
            });
            let receiver = prepare_input(&mut agent, &input)?;
            let result = prepare_receiver(&mut agent, receiver, &input).and_then(|receiver| {
                ArrayPrototype::reverse(&mut agent, receiver, ArgumentsList::default())
            });
            match result {
                Ok(result) => println!("{}", render(&agent, result)),
                Err(error) => {
                    eprintln!("Uncaught exception: {}", error.to_string(&agent));
                    std::process::exit(1);
                }
            }
        }
        Command::Classify { input } => {
            let mut agent = Agent::new(Options::default());
            let receiver = prepare_input(&mut agent, &input)?;
            let receiver = match prepare_receiver(&mut agent, receiver, &input) {
                Ok(receiver) => receiver,
                Err(error) => {
                    eprintln!("Uncaught exception: {}", error.to_string(&agent));
                    std::process::exit(1);
                }
            };
            let Value::Array(array) = receiver else {
                eprintln!("Not an array: {}", receiver.display(&agent));
                std::process::exit(1);
            };
            println!("kind: {:?}", array.elements_kind(&agent));
            println!("representation: {:?}", array.packed_representation(&mut agent));
        }
    }
    Ok(())
}

fn prepare_input(agent: &mut Agent, input: &Input) -> Result<Value, Box<dyn std::error::Error>> {
    let json = sonic_rs::from_str::<sonic_rs::Value>(&input.json)?;
    match value_from_json(agent, &json) {
        Ok(value) => Ok(value),
        Err(error) => Err(error.to_string(agent).into()),
    }
}

/// Punches the requested holes and applies the integrity level.
fn prepare_receiver(agent: &mut Agent, receiver: Value, input: &Input) -> JsResult<Value> {
    let Value::Array(array) = receiver else {
        return Ok(receiver);
    };
    for &index in &input.holes {
        array.internal_delete(agent, PropertyKey::from(index))?;
    }
    if input.frozen {
        set_integrity_level::<Frozen>(agent, array.into_object())?;
    }
    Ok(receiver)
}

fn value_from_json(agent: &mut Agent, json: &sonic_rs::Value) -> JsResult<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    if let Some(boolean) = json.as_bool() {
        return Ok(Value::Boolean(boolean));
    }
    if let Some(number) = json.as_f64() {
        return Ok(Value::from_f64(number));
    }
    if let Some(string) = json.as_str() {
        return Ok(Value::from_str(agent, string));
    }
    if let Some(json_array) = json.as_array() {
        let values = json_array
            .iter()
            .map(|value| value_from_json(agent, value))
            .collect::<JsResult<Vec<_>>>()?;
        return Ok(Array::from_slice(agent, &values).into_value());
    }
    let object = OrdinaryObject::create(agent, None);
    if let Some(json_object) = json.as_object() {
        for (key, value) in json_object.iter() {
            let prop = PropertyKey::from_str(agent, key);
            let js_value = value_from_json(agent, value)?;
            create_data_property(agent, object, prop, js_value)?;
        }
    }
    Ok(object.into_value())
}

/// Renders arrays element by element, writing `<hole>` for missing indexes.
fn render(agent: &Agent, value: Value) -> String {
    let Value::Array(array) = value else {
        return value.display(agent);
    };
    let elements = array
        .to_vec(agent)
        .into_iter()
        .map(|element| match element {
            Some(Value::Array(inner)) => render(agent, Value::Array(inner)),
            Some(element) => element.display(agent),
            None => "<hole>".to_owned(),
        })
        .collect::<Vec<_>>();
    format!("[{}]", elements.join(", "))
}
