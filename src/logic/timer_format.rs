// src/logic/timer_format.rs

/// 経過秒数を `MM:SS` にする。分は上限なし (100分を超えたら3桁になる)。
pub fn format_elapsed(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    let seconds = elapsed_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
