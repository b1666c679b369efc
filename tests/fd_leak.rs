#![cfg(target_os = "linux")]

use std::fs;
use pipesh::executor::{JobState, PipelineRunner};
use pipesh::lexer::{split_pipeline, Tokenizer};
use pipesh::parser::parse_pipeline;
use pipesh::state::ShellState;

fn open_fds() -> usize {
    fs::read_dir("/proc/self/fd").unwrap().count()
}

// Single test in this binary so no other test opens descriptors concurrently.
#[test]
fn foreground_pipelines_leave_no_descriptors_behind() {
    let dir = tempfile::tempdir().unwrap();
    let state = ShellState::with_cwd(dir.path());
    let runner = PipelineRunner::new();

    for line in [
        "echo one > a.txt",
        "printf \"hello\\n\" | cat > b.txt",
        "cat < b.txt | tr a-z A-Z | wc -c > c.txt",
        "echo x > d.txt | cat | cat > e.txt",
    ] {
        let stages = split_pipeline(line).into_iter().map(Tokenizer::tokenize).collect();
        let pipeline = parse_pipeline(stages).unwrap();

        let before = open_fds();
        let job = runner.run(&pipeline, line, &state).unwrap();
        assert_eq!(job.state(), JobState::Exited(0), "{line}");
        drop(job);
        assert_eq!(open_fds(), before, "descriptor leak after {line:?}");
    }

    assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "hello\n");
    assert_eq!(fs::read_to_string(dir.path().join("c.txt")).unwrap().trim(), "6");
}
