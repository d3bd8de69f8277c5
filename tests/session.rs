use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{ChildStdout, Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

fn shell() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_myshell"));
    cmd.arg("--no-color")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn run_session(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd.spawn().expect("failed to start myshell");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write session input");
    child.wait_with_output().expect("failed to wait for myshell")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn prompt_count(text: &str) -> usize {
    text.matches("(PID: ").count()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("myshell_session_{}", name));
    fs::create_dir_all(&dir).unwrap();
    dir.canonicalize().unwrap()
}

fn read_through_prompt(stdout: &mut ChildStdout) -> String {
    let mut seen = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = stdout.read(&mut byte).unwrap();
        assert!(n > 0, "shell closed stdout after {:?}", String::from_utf8_lossy(&seen));
        seen.push(byte[0]);
        if seen.ends_with(b"$ ") {
            return String::from_utf8_lossy(&seen).into_owned();
        }
    }
}

#[test]
fn test_blank_lines_reprompt() {
    let output = run_session(shell(), "   \n\t\n\n");

    assert!(output.status.success());
    // Three blank lines plus the prompt that meets end-of-input.
    assert_eq!(prompt_count(&stdout_of(&output)), 4);
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let output = run_session(shell(), "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_echo_collapses_whitespace() {
    let output = run_session(shell(), "  echo   a   b \n");
    assert!(stdout_of(&output).contains("$ a b\n"));
}

#[test]
fn test_quit_and_exit_terminate() {
    for word in ["quit", "exit"] {
        let output = run_session(shell(), &format!("{}\necho after\n", word));

        assert_eq!(output.status.code(), Some(0), "{} did not exit 0", word);
        assert!(!stdout_of(&output).contains("after"), "{} kept reading", word);
        assert_eq!(prompt_count(&stdout_of(&output)), 1);
    }
}

#[test]
fn test_cd_with_two_arguments_is_refused() {
    let dir = scratch_dir("cd");
    let mut cmd = shell();
    cmd.current_dir(&dir);

    let output = run_session(cmd, "cd / /usr\npwd\n");

    assert!(stderr_of(&output).contains("myshell: cd: too many arguments"));
    assert!(stdout_of(&output).contains(&format!("{}\n", dir.display())));
}

#[test]
fn test_cd_then_pwd() {
    let dir = scratch_dir("cd_pwd");
    let output = run_session(shell(), &format!("cd {}\npwd\n", dir.display()));

    assert!(stdout_of(&output).contains(&format!("$ {}\n", dir.display())));
}

#[test]
fn test_dir_argument_policy() {
    let dir = scratch_dir("dir");
    fs::write(dir.join("listed.txt"), "").unwrap();

    let input = format!("dir {0}\ndir {0} extra\n", dir.display());
    let output = run_session(shell(), &input);

    assert!(stdout_of(&output).contains("listed.txt\n"));
    assert_eq!(stderr_of(&output).matches("Usage: dir [path]").count(), 1);
}

#[test]
fn test_builtin_usage_errors_do_not_stop_the_loop() {
    let output = run_session(shell(), "pwd extra\nhelp me\necho still here\n");

    let stderr = stderr_of(&output);
    assert!(stderr.contains("Usage: pwd"));
    assert!(stderr.contains("Usage: help"));
    assert!(stdout_of(&output).contains("still here"));
}

#[test]
fn test_unknown_program_reports_status_and_continues() {
    let output = run_session(shell(), "nonexistent-cmd-myshell-test\necho alive\n");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Exit status: 1"));
    assert!(stdout.contains("alive"));
    assert!(stderr_of(&output).contains("command not found"));
    assert!(output.status.success());
}

#[test]
fn test_external_program_runs_with_arguments() {
    let dir = scratch_dir("external");
    fs::write(dir.join("args.sh"), "printf '%s|' \"$0\" \"$@\"; echo\n").unwrap();

    let output = run_session(shell(), &format!("sh {} one two\n", dir.join("args.sh").display()));

    assert!(stdout_of(&output).contains("one|two|"));
    assert!(!stdout_of(&output).contains("Exit status"));
}

#[test]
fn test_child_killed_by_signal_is_reported() {
    let dir = scratch_dir("signal");
    let script = dir.join("selfkill.sh");
    fs::write(&script, "kill -KILL $$\n").unwrap();

    let output = run_session(shell(), &format!("sh {}\necho survived\n", script.display()));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Terminated by signal: SIGKILL"));
    assert!(stdout.contains("survived"));
}

#[test]
fn test_child_interrupting_itself_leaves_shell_running() {
    let dir = scratch_dir("sigint");
    let script = dir.join("selfint.sh");
    fs::write(&script, "kill -INT $$\nsleep 1\n").unwrap();

    let output = run_session(shell(), &format!("sh {}\necho survived\n", script.display()));

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("survived"));
    assert_eq!(prompt_count(&stdout), 3);
}

#[test]
fn test_interrupt_at_idle_prompt_reprompts_once() {
    let mut child = shell().spawn().unwrap();
    let mut stdout = child.stdout.take().unwrap();
    let pid = Pid::from_raw(child.id() as i32);

    let first = read_through_prompt(&mut stdout);
    assert!(first.starts_with("(PID: "));

    // Let the shell settle into its blocking read.
    thread::sleep(Duration::from_millis(300));
    kill(pid, Signal::SIGINT).unwrap();

    let second = read_through_prompt(&mut stdout);
    assert!(second.starts_with("\n(PID: "), "got {:?}", second);
    assert_eq!(prompt_count(&second), 1);

    child.stdin.take().unwrap().write_all(b"exit\n").unwrap();
    let status = child.wait().unwrap();
    assert!(status.success());

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();
    assert_eq!(prompt_count(&rest), 0);
}

#[test]
fn test_debug_echoes_tokens() {
    let mut cmd = shell();
    cmd.arg("--debug");

    let output = run_session(cmd, "echo x y\n");
    assert!(stdout_of(&output).contains("Command: echo\nArg: x\nArg: y\nx y\n"));
}

#[test]
fn test_unknown_flag_fails_startup() {
    let mut cmd = shell();
    cmd.arg("--bogus");

    let output = run_session(cmd, "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Flag error: unknown flag --bogus"));
}

#[test]
fn test_pause_consumes_the_next_line() {
    let output = run_session(shell(), "pause\nack-line-not-a-command\necho after\n");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Press Enter to continue..."));
    assert!(stdout.contains("after"));
    assert!(!stderr_of(&output).contains("ack-line-not-a-command"));
    assert!(!stdout.contains("Exit status"));
    // pause, echo, end of input.
    assert_eq!(prompt_count(&stdout), 3);
}

#[test]
fn test_stopped_child_returns_control() {
    let dir = scratch_dir("stop");
    let script = dir.join("selfstop.sh");
    // Drop the inherited pipes so the stopped process can't hold them open.
    fs::write(&script, "exec >/dev/null 2>&1\nkill -STOP $$\n").unwrap();

    let output = run_session(shell(), &format!("sh {}\necho survived\n", script.display()));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Stopped by signal: SIGSTOP"));
    assert!(stdout.contains("survived"));
    assert!(output.status.success());
}

#[test]
fn test_quiet_suppresses_diagnostics() {
    let mut cmd = shell();
    cmd.arg("--quiet");

    let output = run_session(cmd, "pwd extra\nnonexistent-cmd-myshell-quiet\necho done\n");

    let stdout = stdout_of(&output);
    let stderr = stderr_of(&output);
    assert!(!stderr.contains("Usage: pwd"));
    assert!(!stdout.contains("Exit status"));
    assert!(stdout.contains("done"));
    // The child still speaks for itself.
    assert!(stderr.contains("command not found"));
}
