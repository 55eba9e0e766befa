use clap::Parser;
use radonhash::io::load_gray_image;
use radonhash::{Digest, DigestConfig, Hasher, OwnedImage, RadonHashError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Radon perceptual digests (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DigestConfigJson {
    angle_count: usize,
    nb_coeffs: usize,
    blur_sigma: f32,
    parallel: bool,
}

impl Default for DigestConfigJson {
    fn default() -> Self {
        let cfg = DigestConfig::default();
        Self {
            angle_count: cfg.angle_count,
            nb_coeffs: cfg.nb_coeffs,
            blur_sigma: cfg.blur_sigma,
            parallel: cfg.parallel,
        }
    }
}

impl From<DigestConfigJson> for DigestConfig {
    fn from(value: DigestConfigJson) -> Self {
        Self {
            angle_count: value.angle_count,
            nb_coeffs: value.nb_coeffs,
            blur_sigma: value.blur_sigma,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoredDigest {
    id: String,
    hex: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Config {
    images: Vec<String>,
    stored: Vec<StoredDigest>,
    output_path: Option<String>,
    compare: bool,
    min_score: f64,
    digest: DigestConfigJson,
}

#[derive(Debug, Serialize)]
struct DigestRecord {
    id: String,
    hex: String,
    catalog_key: i32,
    flat: bool,
}

impl From<&Digest> for DigestRecord {
    fn from(value: &Digest) -> Self {
        Self {
            id: value.id().unwrap_or_default().to_string(),
            hex: value.to_hex(),
            catalog_key: value.catalog_key(),
            flat: value.is_flat(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PairRecord {
    a: String,
    b: String,
    score: f64,
    shift: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    digests: Vec<DigestRecord>,
    pairs: Vec<PairRecord>,
}

/// Scores every pair of digests, best first. Pairs whose digests differ in
/// length are skipped with a warning.
fn pair_records(
    hasher: &Hasher,
    digests: &[Digest],
    min_score: f64,
) -> Result<Vec<PairRecord>, RadonHashError> {
    let mut pairs = Vec::new();
    for (i, a) in digests.iter().enumerate() {
        for b in &digests[i + 1..] {
            let corr = match hasher.compare_digests(a, b) {
                Ok(corr) => corr,
                Err(RadonHashError::DigestSizeMismatch { left, right }) => {
                    tracing::warn!(
                        a = a.id().unwrap_or_default(),
                        b = b.id().unwrap_or_default(),
                        left,
                        right,
                        "skipping pair with mismatched digest sizes"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            if corr.score < min_score {
                continue;
            }
            pairs.push(PairRecord {
                a: a.id().unwrap_or_default().to_string(),
                b: b.id().unwrap_or_default().to_string(),
                score: corr.score,
                shift: corr.shift,
            });
        }
    }
    pairs.sort_by(|x, y| y.score.total_cmp(&x.score));
    Ok(pairs)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("radonhash=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.images.is_empty() && config.stored.is_empty() {
        return Err("images or stored must list at least one entry".into());
    }
    if !(0.0..=1.0).contains(&config.min_score) {
        return Err("min_score must lie in [0, 1]".into());
    }

    let cfg = DigestConfig::from(config.digest);
    cfg.validate()?;
    let hasher = Hasher::new().with_config(cfg);

    let images = config
        .images
        .iter()
        .map(load_gray_image)
        .collect::<Result<Vec<OwnedImage>, _>>()?;
    let views: Vec<_> = images.iter().map(OwnedImage::view).collect();
    let mut digests: Vec<Digest> = hasher
        .digest_batch(&views)?
        .into_iter()
        .zip(&config.images)
        .map(|(digest, path)| digest.with_id(path.as_str()))
        .collect();

    tracing::info!(count = digests.len(), "image digests computed");

    for stored in &config.stored {
        digests.push(Digest::from_hex(&stored.hex)?.with_id(stored.id.as_str()));
    }

    let pairs = if config.compare {
        pair_records(&hasher, &digests, config.min_score)?
    } else {
        Vec::new()
    };
    let output = Output {
        digests: digests.iter().map(DigestRecord::from).collect(),
        pairs,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::pair_records;
    use radonhash::{Digest, Hasher};

    fn digest(id: &str, coeffs: &[u8]) -> Digest {
        Digest::from_coeffs(coeffs.to_vec()).unwrap().with_id(id)
    }

    #[test]
    fn mismatched_sizes_are_skipped() {
        let coeffs: Vec<u8> = (0..40u8).map(|i| i * 6).collect();
        let digests = vec![
            digest("a", &coeffs),
            digest("short", &coeffs[..30]),
            digest("b", &coeffs),
        ];
        let pairs = pair_records(&Hasher::new(), &digests, 0.0).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("a", "b"));
        assert!(pairs[0].score > 0.99);
    }

    #[test]
    fn pairs_are_sorted_and_filtered() {
        let up: Vec<u8> = (0..40u8).map(|i| i * 6).collect();
        let mut bumpy = up.clone();
        bumpy.swap(3, 30);
        let digests = vec![digest("up", &up), digest("same", &up), digest("bumpy", &bumpy)];
        let all = pair_records(&Hasher::new(), &digests, 0.0).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!((all[0].a.as_str(), all[0].b.as_str()), ("up", "same"));

        let strict = pair_records(&Hasher::new(), &digests, 0.999).unwrap();
        assert_eq!(strict.len(), 1);
    }
}
