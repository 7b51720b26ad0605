use playline::{ClipKind, ClipStore, Fps, InMemorySink, PlaceSpec, export_manifests, place};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut store = ClipStore::new();
    place(&mut store, PlaceSpec::new(ClipKind::Video, "gen/take-01.mp4"))?;
    place(&mut store, PlaceSpec::new(ClipKind::Video, "gen/take-02.mp4"))?;
    place(
        &mut store,
        PlaceSpec::new(ClipKind::Image, "gen/lower-third.png").duration_secs(8.0),
    )?;

    let mut sink = InMemorySink::new();
    let stats = export_manifests(&store, Fps::new(30, 1)?, &mut sink)?;

    println!("samples:      {}", stats.samples_total);
    println!("with main:    {}", stats.with_main);
    println!("with overlay: {}", stats.with_overlay);
    for m in sink.frames().iter().step_by(150) {
        println!(
            "t={:>6.2}: main={} overlays={}",
            m.time_secs,
            m.main.is_some(),
            m.overlays.len()
        );
    }

    Ok(())
}
