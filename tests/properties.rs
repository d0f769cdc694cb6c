//! Property sweeps over seeded random tables (same generator as `fuzz_tables`).
//!
//! FUZZ_SEED / FUZZ_ITERS override the defaults for longer local runs.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tokengen::{
    compiler::{Artifacts, IterationStamp, TokenId, compile, verify},
    dev::generator::gen_random_table,
    tokens::PayloadKind,
};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn sweep(mut f: impl FnMut(&mut StdRng, usize)) {
    let seed = env_u64("FUZZ_SEED", 0x70CE);
    let iters = env_u64("FUZZ_ITERS", 64) as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..iters {
        f(&mut rng, i);
    }
}

#[test]
fn compiled_tables_satisfy_every_invariant() {
    sweep(|rng, i| {
        let n = rng.random_range(0..200);
        let a = rng.random_range(0..6);
        let table = gen_random_table(rng, n, a);
        let c = compile(&table).unwrap();
        if let Err(msg) = verify(&table, &c) {
            panic!("iter {i}: {msg}");
        }
    });
}

#[test]
fn keyword_list_is_the_sorted_tail() {
    sweep(|rng, _| {
        let table = gen_random_table(rng, 60, 0);
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0)).unwrap();

        let mut want: Vec<&str> = table
            .definitions
            .iter()
            .filter(|d| d.is_keyword())
            .map(|d| d.short_name.as_ref())
            .collect();
        want.sort_unstable_by(|x, y| x.as_bytes().cmp(y.as_bytes()));

        let listed: Vec<String> = want.iter().map(|k| format!("    \"{k}\",")).collect();
        let block = format!(
            "const char *global_token_keywords_list[] = {{\n{}}};\n",
            listed.iter().map(|l| format!("{l}\n")).collect::<String>()
        );
        assert!(a.definitions.contains(&block));
        assert!(a.definitions.contains(&format!(
            "global_token_keywords_list_length = {};",
            want.len()
        )));
        assert_eq!(c.first_keyword, TokenId((c.len() - want.len()) as u32));
        assert!(a.declarations.contains(&format!(
            "#define BEGINNING_OF_KEYWORD_TOKENS {}\n",
            c.first_keyword
        )));
    });
}

#[test]
fn aliases_share_their_target_constant_value() {
    sweep(|rng, _| {
        let table = gen_random_table(rng, 40, 4);
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0)).unwrap();
        for alias in &table.aliases {
            let value_of = |constant: &str| {
                a.declarations
                    .lines()
                    .find_map(|l| {
                        let mut parts = l.split_whitespace();
                        (parts.next() == Some("#define") && parts.next() == Some(constant))
                            .then(|| parts.next().map(str::to_owned))
                            .flatten()
                    })
                    .unwrap_or_else(|| panic!("{constant} not declared"))
            };
            assert_eq!(
                value_of(&alias.constant_name()),
                value_of(&tokengen::tokens::constant_name(&alias.target))
            );
        }
    });
}

#[test]
fn payload_string_decodes_back_to_the_table() {
    sweep(|rng, _| {
        let table = gen_random_table(rng, 50, 0);
        let c = compile(&table).unwrap();
        let a = Artifacts::render(&c, IterationStamp(0)).unwrap();
        let line = a
            .definitions
            .lines()
            .find(|l| l.starts_with("const char global_token_extra_format_table[]"))
            .unwrap();
        let encoded = line.split('"').nth(1).unwrap();
        assert_eq!(encoded.chars().count(), c.len());
        for (ch, e) in encoded.chars().zip(&c.entries) {
            assert_eq!(PayloadKind::decode(ch), Some(e.def.payload));
        }
    });
}

#[test]
fn output_depends_only_on_table_and_stamp() {
    sweep(|rng, _| {
        let table = gen_random_table(rng, 30, 2);
        let one = Artifacts::render(&compile(&table).unwrap(), IterationStamp(5)).unwrap();
        let two = Artifacts::render(&compile(&table).unwrap(), IterationStamp(5)).unwrap();
        assert_eq!(one, two);

        let other = Artifacts::render(&compile(&table).unwrap(), IterationStamp(6)).unwrap();
        assert_eq!(one.definitions, other.definitions);
        let diff: Vec<(&str, &str)> = one
            .declarations
            .lines()
            .zip(other.declarations.lines())
            .filter(|(x, y)| x != y)
            .collect();
        assert_eq!(
            diff,
            [(
                "#define TOKEN_ITERATION_VERSION 0x00000005",
                "#define TOKEN_ITERATION_VERSION 0x00000006"
            )]
        );
    });
}
