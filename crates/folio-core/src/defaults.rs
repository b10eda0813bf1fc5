//! Built-in defaults for the animated decorations.

/// Number of particles in the background field.
pub const PARTICLE_COUNT: usize = 50;

/// Number of drifting code snippets.
pub const LINE_COUNT: usize = 8;

/// Background tick period in milliseconds.
pub const TICK_MS: u64 = 50;

/// Clock refresh period in milliseconds.
pub const CLOCK_MS: u64 = 1000;

/// Delay before each typed character, in milliseconds.
pub const CHAR_DELAY_MS: u64 = 50;

/// Pause after each typed command, in milliseconds.
pub const COMMAND_PAUSE_MS: u64 = 1000;

/// Delay between mount and the first typed character, in milliseconds.
pub const TYPEWRITER_START_MS: u64 = 2000;

/// Commands replayed by the terminal panel.
pub const COMMANDS: &[&str] = &[
    "sudo apt-get install awesome-dev",
    "npm install --save cool-projects",
    "git commit -m \"Initial commit to greatness\"",
    "python -c \"print('Hello, World!')\"",
    "./compile_dreams.sh",
];

/// Candidate texts for the drifting code snippets.
pub const SNIPPETS: &[&str] = &[
    "if (robot.autonomous) { navigate(); }",
    "model.train(epochs=100)",
    "sensor.read() > threshold",
    "cv2.detectContours()",
    "digitalWrite(LED_PIN, HIGH)",
    "import tensorflow as tf",
    "while(true) { solve(); }",
    "const future = await AI.predict()",
];
