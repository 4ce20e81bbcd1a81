use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use reverse_vm::ecmascript::{
    builtins::{ArgumentsList, Array, ArrayPrototype},
    execution::{Agent, Options},
    types::Value,
};

const LEN: i32 = 10_000;

fn smis() -> Vec<Option<Value>> {
    (0..LEN).map(|i| Some(Value::from(i))).collect()
}

fn doubles() -> Vec<Option<Value>> {
    (0..LEN).map(|i| Some(Value::from(i as f64 + 0.5))).collect()
}

fn mixed() -> Vec<Option<Value>> {
    (0..LEN)
        .map(|i| {
            Some(if i % 3 == 0 {
                Value::Null
            } else {
                Value::from(i)
            })
        })
        .collect()
}

fn holey() -> Vec<Option<Value>> {
    (0..LEN)
        .map(|i| if i % 4 == 0 { None } else { Some(Value::from(i)) })
        .collect()
}

macro_rules! bench_harness {
    ($(($name:literal, $elements:expr, $generic:literal),)*) => {
        fn bench_reverse(c: &mut Criterion) {
            $(
                {
                    let elements = $elements;
                    c.bench_function(concat!($name, " (Array.prototype.reverse)"), move |b| {
                        b.iter_batched(
                            || {
                                let mut agent = Agent::new(Options {
                                    disable_array_fast_paths: $generic,
                                    ..Default::default()
                                });
                                let array = Array::from_elements(&mut agent, &elements);
                                (agent, array)
                            },
                            |(mut agent, array)| {
                                ArrayPrototype::reverse(
                                    &mut agent,
                                    array.into_value(),
                                    ArgumentsList::default(),
                                )
                                .unwrap();
                            },
                            BatchSize::LargeInput,
                        )
                    });
                }
            )*
        }
    };
}

bench_harness!(
    ("packed_smi", smis(), false),
    ("packed_double", doubles(), false),
    ("packed", mixed(), false),
    ("packed_smi_generic", smis(), true),
    ("holey", holey(), false),
);

criterion_group!(benches, bench_reverse);
criterion_main!(benches);
