// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn raw_interpreter_has_no_preamble() {
    let sh = Interpreter::raw("sh");
    assert_eq!(sh.program, "sh");
    assert!(sh.file_args.is_empty());
}

#[test]
fn powershell_preamble_is_non_interactive() {
    let pwsh = Interpreter::powershell("pwsh");
    assert_eq!(pwsh.program, "pwsh");
    assert_eq!(
        pwsh.file_args,
        vec!["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"]
    );
}

#[tokio::test]
async fn probe_missing_binary_fails_quietly() {
    assert!(!probe("definitely-not-an-interpreter", Duration::from_secs(1)).await);
}

#[tokio::test]
async fn probe_requires_zero_exit() {
    // `true` ignores the -Version argument and exits 0; `false` exits 1.
    assert!(probe("true", Duration::from_secs(5)).await);
    assert!(!probe("false", Duration::from_secs(5)).await);
}
