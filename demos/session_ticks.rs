use playline::{
    Artifact, ArtifactKind, CannedGenerator, EditorSession, ToolInputs, ToolKind, find_tool,
    format_timecode,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let tool = find_tool("video-gen").ok_or_else(|| anyhow::anyhow!("missing builtin tool"))?;
    let backend = CannedGenerator::new().with(
        ToolKind::VideoSynthesis,
        Artifact::new(ArtifactKind::Video, "gen/take-01.mp4"),
    );

    let mut session = EditorSession::new();
    for _ in 0..2 {
        let clip = session.generate_and_place(
            &tool,
            &ToolInputs::new().prompt("a lighthouse at dusk"),
            &backend,
        )?;
        println!(
            "placed '{}' at {}",
            clip.display_name,
            format_timecode(clip.span.start_secs)
        );
    }

    session.play();
    let mut fired = 0u32;
    while session.pump().is_some() {
        fired += 1;
        if fired % 250 == 0 {
            println!("t = {}", format_timecode(session.clock().current_secs()));
        }
    }
    println!(
        "completed after {fired} ticks; back at {}",
        format_timecode(session.clock().current_secs())
    );

    Ok(())
}
