//! Code frame rendering for ranged template errors
//!
//! Produces the same layout as the template compiler's own
//! `generateCodeFrame`:
//!
//! ```text
//! 1  |  <div>
//! 2  |    <span>{{ a + }}</span>
//!    |          ^^^^^^^^
//! 3  |  </div>
//! ```

/// Lines of context shown around the offending line
const RANGE: usize = 2;

/// Render `source` with the character range `start..end` underlined
pub fn generate_code_frame(source: &str, start: usize, end: usize) -> String {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let lengths: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();

    let start = start as i64;
    let end = end as i64;
    let mut count: i64 = 0;
    let mut frame = Vec::new();

    for i in 0..lines.len() {
        count += lengths[i] as i64 + 1;
        if count < start {
            continue;
        }

        let mut j = i.saturating_sub(RANGE);
        while j < lines.len() && (j <= i + RANGE || end > count) {
            frame.push(format!("{:<3}|  {}", j + 1, lines[j]));
            let line_length = lengths[j] as i64;

            if j == i {
                let pad = start - (count - line_length) + 1;
                let length = if end > count {
                    line_length - pad
                } else {
                    end - start
                };
                frame.push(format!("   |  {}{}", repeat(' ', pad), repeat('^', length)));
            } else if j > i {
                if end > count {
                    let length = (end - count).min(line_length);
                    frame.push(format!("   |  {}", repeat('^', length)));
                }
                count += line_length + 1;
            }
            j += 1;
        }
        break;
    }

    frame.join("\n")
}

fn repeat(ch: char, n: i64) -> String {
    std::iter::repeat(ch).take(n.max(0) as usize).collect()
}
