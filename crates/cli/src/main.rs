use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quadmax::rand::{draw_candidate, ReplayToken, SampleCfg};
use quadmax::{ConvexQuad, QuadCfg, Vec2, EPS};
use std::io::Write;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod report;

#[derive(Parser)]
#[command(name = "quadmax")]
#[command(about = "Validate convex quadrilaterals and find the one with the largest perimeter")]
struct Cmd {
    /// Log rejections and parse details (debug level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate a batch of candidates (text file, CSV, or `-` for stdin)
    Run {
        #[arg(long)]
        input: String,
        /// Write a JSON report here (plus a provenance sidecar)
        #[arg(long)]
        out: Option<String>,
        #[arg(long, default_value_t = EPS, value_parser = parse_eps)]
        eps: f64,
    },
    /// Validate a single candidate: ax ay bx by cx cy dx dy
    Check {
        #[arg(
            num_args = 8,
            allow_negative_numbers = true,
            value_name = "COORD",
            value_parser = parse_coord
        )]
        coords: Vec<f64>,
        #[arg(long, default_value_t = EPS, value_parser = parse_eps)]
        eps: f64,
    },
    /// Emit reproducible random candidates in the text format
    Sample {
        #[arg(long, default_value_t = 10)]
        count: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Probability of a deliberately invalid candidate
        #[arg(long, default_value_t = 0.25)]
        invalid_frac: f64,
        #[arg(long)]
        out: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Coordinates must be finite; NaN/Inf never reach the geometry checks.
fn parse_coord(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("not a number: {s:?}"))?;
    if !v.is_finite() {
        return Err(format!("non-finite coordinate: {s:?}"));
    }
    Ok(v)
}

fn parse_eps(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("not a number: {s:?}"))?;
    QuadCfg::checked(v)
        .map(|cfg| cfg.eps)
        .ok_or_else(|| format!("eps must be finite and > 0, got {s}"))
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Run { input, out, eps } => run(input, out, eps),
        Action::Check { coords, eps } => check(&coords, eps),
        Action::Sample {
            count,
            seed,
            invalid_frac,
            out,
        } => sample(count, seed, invalid_frac, out),
        Action::Report => report(),
    }
}

fn run(input: String, out: Option<String>, eps: f64) -> Result<()> {
    tracing::info!(input, out = ?out, eps, "run");
    let batch = input::read_batch(&input)?;
    let cfg = QuadCfg::with_eps(eps);
    let rep = report::evaluate(&batch, cfg);
    report::render(&rep, std::io::stdout().lock())?;
    if let Some(w) = &rep.winner {
        tracing::info!(number = w.number, perimeter = w.perimeter, "winner");
    } else {
        tracing::info!(outcome = ?rep.outcome, "no_winner");
    }

    if let Some(out) = out {
        let out_path = Path::new(&out);
        create_parent(out_path)?;
        std::fs::write(out_path, serde_json::to_vec_pretty(&rep)?)
            .with_context(|| format!("writing {}", out_path.display()))?;
        let prov = provenance::Sidecar::new(serde_json::json!({
            "command": "run",
            "eps": eps,
            "rows": batch.rows.len(),
        }))
        .with_input(input)
        .write_next_to(out_path)?;
        tracing::info!(report = %out_path.display(), provenance = %prov.display(), "written");
    }
    Ok(())
}

fn check(coords: &[f64], eps: f64) -> Result<()> {
    let points: Vec<Vec2<f64>> = coords
        .chunks_exact(2)
        .map(|c| Vec2::new(c[0], c[1]))
        .collect();
    match ConvexQuad::from_points_with_cfg(&points, QuadCfg::with_eps(eps)) {
        Ok(q) => {
            println!("{q}");
            println!("Perimeter = {:.2}", q.perimeter());
        }
        Err(e) => {
            tracing::debug!(reason = e.kind(), "rejected");
            println!("rejected ({}): {e}", e.kind());
        }
    }
    Ok(())
}

fn sample(count: u64, seed: u64, invalid_frac: f64, out: Option<String>) -> Result<()> {
    let cfg = SampleCfg {
        invalid_frac,
        ..SampleCfg::default()
    };
    let mut text = format!("{count}\n");
    for index in 0..count {
        let pts = draw_candidate(cfg, ReplayToken { seed, index });
        let line: Vec<String> = pts
            .iter()
            .flat_map(|p| [p.x.to_string(), p.y.to_string()])
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    match out {
        Some(out) => {
            let out_path = Path::new(&out);
            create_parent(out_path)?;
            std::fs::write(out_path, &text)
                .with_context(|| format!("writing {}", out_path.display()))?;
            tracing::info!(count, seed, out, "sample");
        }
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn report() -> Result<()> {
    let block = provenance::Sidecar::new(serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn run_writes_report_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("quads.txt");
        std::fs::write(&input, "2\n0 0 2 0 2 2 0 2\n0 0 1 0 1 0 0 1\n").unwrap();
        let out = dir.path().join("out/report.json");
        run(
            input.to_string_lossy().into_owned(),
            Some(out.to_string_lossy().into_owned()),
            EPS,
        )
        .unwrap();
        let v: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(v["accepted"], 1);
        assert_eq!(v["candidates"][1]["reason"], "duplicate_vertex");
        assert!(dir.path().join("out/report.provenance.json").exists());
    }

    #[test]
    fn sample_round_trips_through_parser() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sample.txt");
        sample(25, 7, 0.5, Some(out.to_string_lossy().into_owned())).unwrap();
        let batch = input::read_batch(out.to_str().unwrap()).unwrap();
        assert_eq!(batch.declared, Some(25));
        assert_eq!(batch.rows.len(), 25);
        assert_eq!(batch.malformed(), 0);
        let first = batch.rows[0].points.clone().unwrap();
        assert_eq!(
            first,
            draw_candidate(
                SampleCfg {
                    invalid_frac: 0.5,
                    ..SampleCfg::default()
                },
                ReplayToken { seed: 7, index: 0 }
            )
        );
    }

    #[test]
    fn cli_parses_negative_coordinates() {
        let cmd = Cmd::try_parse_from([
            "quadmax", "check", "-1", "-1", "1", "-1", "1", "1", "-1", "1", "--eps", "1e-6",
        ])
        .unwrap();
        match cmd.action {
            Action::Check { coords, eps } => {
                assert_eq!(coords.len(), 8);
                assert_eq!(coords[0], -1.0);
                assert_eq!(eps, 1e-6);
            }
            _ => panic!("expected check"),
        }
        assert!(Cmd::try_parse_from(["quadmax", "check", "0", "0", "1"]).is_err());
    }

    #[test]
    fn non_finite_coordinates_are_refused() {
        for bad in ["NaN", "inf", "-inf"] {
            let args = ["quadmax", "check", bad, "0", "1", "0", "1", "1", "0", "1"];
            assert!(Cmd::try_parse_from(args).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn unusable_eps_is_refused() {
        for bad in ["-1", "0", "NaN", "inf", "abc"] {
            let mut args: Vec<String> = ["quadmax", "check", "0", "0", "1", "0", "2", "0", "0", "1"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            args.push(format!("--eps={bad}"));
            assert!(Cmd::try_parse_from(args).is_err(), "eps {bad} accepted");
            let run = ["quadmax", "run", "--input", "-", "--eps", bad];
            assert!(Cmd::try_parse_from(run).is_err(), "run eps {bad} accepted");
        }
        let ok = Cmd::try_parse_from(["quadmax", "run", "--input", "-"]).unwrap();
        match ok.action {
            Action::Run { eps, .. } => assert_eq!(eps, EPS),
            _ => panic!("expected run"),
        }
    }
}
