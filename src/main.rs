//! Headless smoke tool: applies stored edit settings to an image file and
//! writes the composited JPEG, exercising the same save path the editor
//! uses.
//!
//! Usage: `postframe <input-image> <output.jpg> [edit-settings.json]`

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use postframe::{
    config, logging, ContentRecord, ContentStore, EditSession, EditSettings, MemoryStore,
};

struct Args {
    input: PathBuf,
    output: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args_os().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: postframe <input-image> <output.jpg> [edit-settings.json]");
    };
    Ok(Args {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        settings: args.next().map(PathBuf::from),
    })
}

fn main() -> Result<()> {
    logging::init();
    let args = parse_args()?;

    let image = fs::read(&args.input)
        .with_context(|| format!("reading input image {}", args.input.display()))?;
    let mut record = ContentRecord::new(image);

    if let Some(path) = &args.settings {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading edit settings {}", path.display()))?;
        let settings: EditSettings =
            serde_json::from_str(&contents).context("parsing edit settings json")?;
        record.edit_settings = Some(settings);
    }

    let mut store = MemoryStore::new(record);
    let loaded = store.load().context("loading content record")?;
    let mut session = EditSession::start(&loaded, config::load_editor_config())
        .context("starting edit session")?;
    session.save(&mut store).context("compositing edit")?;

    fs::write(&args.output, &store.record().image)
        .with_context(|| format!("writing output {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "composited image written");
    Ok(())
}
