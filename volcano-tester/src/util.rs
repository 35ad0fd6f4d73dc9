use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse the `--seeds` list. Seeds are form values, so they must fit an `i32`.
pub fn parse_seeds(s: &str) -> Result<Vec<i32>> {
    let seeds = split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<i32>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!seeds.is_empty(), "at least one seed is required");
    Ok(seeds)
}
