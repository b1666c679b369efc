use log::debug;

/// Split a line into pipeline segments on `|`.
///
/// A `|` inside single or double quotes, or preceded by a backslash, is
/// literal. Segments are returned verbatim (no trimming, no unquoting), so
/// joining them with `|` gives back the original line.
pub fn split_pipeline(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for (i, ch) in line.char_indices() {
        if esc {
            esc = false;
            continue;
        }
        match ch {
            '\\' => esc = true,
            '\'' if !dq => sq = !sq,
            '"' if !sq => dq = !dq,
            '|' if !sq && !dq => {
                segments.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&line[start..]);

    debug!("split {:?} into {} segment(s)", line, segments.len());
    segments
}
