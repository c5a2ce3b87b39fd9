use anyhow::{Context, Result};
use lrpt::deframing::{ResyncOpts, ResyncStats, Resynchronizer};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    io::{stdout, Write},
    path::Path,
};

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum Format {
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize)]
struct Info {
    filename: String,
    raw_symbols: usize,
    resynced_symbols: usize,
    opts: ResyncOpts,
    stats: ResyncStats,
    /// Acquisitions by sync byte, keyed by the byte in hex.
    sync_hits: BTreeMap<String, usize>,
}

fn summarize(fpath: &Path, opts: ResyncOpts) -> Result<Info> {
    let raw = std::fs::read(fpath).context("reading input")?;
    let mut resync = Resynchronizer::new(opts);
    let data = resync.resync(&raw);

    Ok(Info {
        filename: fpath.to_string_lossy().to_string(),
        raw_symbols: raw.len(),
        resynced_symbols: data.len(),
        opts: resync.opts().clone(),
        stats: resync.stats.clone(),
        sync_hits: resync
            .sync_hits
            .iter()
            .map(|(sync, count)| (format!("{sync:#04x}"), *count))
            .collect(),
    })
}

pub fn info(fpath: &Path, format: &Format, opts: ResyncOpts) -> Result<()> {
    let info = summarize(fpath, opts)?;

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &info).context("serializing to json")
        }
        Format::Text => {
            let data = render_text(&info).context("serializing info")?;
            stdout()
                .write_all(data.as_bytes())
                .context("writing to stdout")
        }
    }
}

fn render_text(info: &Info) -> Result<String> {
    let mut hb = handlebars::Handlebars::new();
    hb.register_template_string("info", TEXT_TEMPLATE)
        .context("registering template")?;

    hb.render("info", &info).context("rendering text")
}

const TEXT_TEMPLATE: &str = r"{{ filename }}
===============================================================================
Raw symbols:      {{ raw_symbols }}
Resynced symbols: {{ resynced_symbols }}
Depth:            {{ opts.depth }}
Lookahead:        {{ opts.lookahead }}
Retry periods:    {{ opts.retry_periods }}
Acquisitions:     {{ stats.acquisitions }}
Frames:           {{ stats.frames }}
Flywheel frames:  {{ stats.flywheel_frames }}
Sync losses:      {{ stats.sync_losses }}
Sync bytes:       {{ #each sync_hits }}{{ @key }}={{ this }}{{ #if @last }}{{ else }}, {{ /if }}{{ /each }}
";
