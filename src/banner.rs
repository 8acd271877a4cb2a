// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
   ____          _      ____              _
  / ___|___   __| | ___| __ )  ___   ___ | | __
 | |   / _ \ / _` |/ _ \  _ \ / _ \ / _ \| |/ /
 | |__| (_) | (_| |  __/ |_) | (_) | (_) |   <
  \____\___/ \__,_|\___|____/ \___/ \___/|_|\_\

    Online Code Notebook · Judge0 run proxy
"#;
    println!("{}", banner);
}
