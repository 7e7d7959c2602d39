//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common startup failures.

use std::fmt::Write;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Outermost message decides config errors; the full chain the rest
    let outer_msg = error.to_string();
    let error_msg = format!("{:#}", error);

    if is_config_error(&outer_msg) {
        format_config_error(&mut output);
    } else if error_msg.contains("D-Bus") || error_msg.contains("dbus") {
        format_dbus_error(&mut output);
    } else if error_msg.contains("input") || error_msg.contains("source") {
        format_input_error(&mut output);
    } else if error_msg.contains("xdotool") || error_msg.contains("command") {
        format_action_error(&mut output);
    } else {
        format_generic_error(&mut output, &error_msg);
    }

    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();

    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: touch-gestured -vv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Watch the signal: dbus-monitor \"interface='com.deepin.daemon.Gesture'\""
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

/// Validation and config-file errors, including invalid bus names and paths
fn is_config_error(outer_msg: &str) -> bool {
    outer_msg.contains("config") || outer_msg.starts_with("Invalid")
}

fn format_dbus_error(output: &mut String) {
    writeln!(output, "D-Bus Registration Error").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "Could not publish the gesture service on the message bus."
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No session bus in this environment").ok();
    writeln!(output, "     → Check: echo $DBUS_SESSION_BUS_ADDRESS").ok();
    writeln!(
        output,
        "     → Start one: dbus-run-session -- touch-gestured"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Service name already owned").ok();
    writeln!(
        output,
        "     → Another gesture daemon is running (e.g. dde-daemon)"
    )
    .ok();
    writeln!(
        output,
        "     → Check: busctl --user status com.deepin.daemon.Gesture"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. System bus policy denies the name").ok();
    writeln!(
        output,
        "     → Install a policy file under /usr/share/dbus-1/system.d/"
    )
    .ok();
    writeln!(output, "     → Or use the session bus: --bus session").ok();
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid thresholds").ok();
    writeln!(
        output,
        "     → drag_threshold_px and long_press_ms must be > 0"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. Invalid binding").ok();
    writeln!(output, "     → swipe takes up/down/left/right").ok();
    writeln!(output, "     → pinch takes in/out").ok();
    writeln!(output, "     → fingers must be at least 1").ok();
}

fn format_input_error(output: &mut String) {
    writeln!(output, "Input Source Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not read touch input.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Input file not found").ok();
    writeln!(output, "     → Check the path given with --input").ok();
    writeln!(output, "     → Use '-' to read from stdin").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Wrong record format").ok();
    writeln!(output, "     → One JSON object per line, tagged with \"kind\"").ok();
    writeln!(
        output,
        "     → {{\"kind\":\"touch\",\"device_id\":\"dev0\",\"phase\":\"down\",\"timestamp\":0,\"x\":0.0,\"y\":0.0}}"
    )
    .ok();
}

fn format_action_error(output: &mut String) {
    writeln!(output, "Action Execution Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not run the input synthesis command.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. xdotool is not installed").ok();
    writeln!(output, "     → Install: sudo apt install xdotool").ok();
    writeln!(output, "     → Or disable local actions: --no-actions").ok();
    writeln!(output).ok();
    writeln!(output, "  2. No X display").ok();
    writeln!(output, "     → Check: echo $DISPLAY").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Daemon Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while running the daemon.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
