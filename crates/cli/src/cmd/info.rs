use anyhow::Result;

use trubuild_lib::config::BuildConfig;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_info(config: &BuildConfig, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(config);
  }

  let layout = config.layout();
  let tools = &config.toolchain;
  println!("System:");
  print_stat("Platform", &config.platform.triple());
  print_stat("Project", &layout.project_dir().display().to_string());
  println!();
  println!("Stages:");
  print_stat("Refresh sources", &config.options.refresh_sources.to_string());
  print_stat("Rebuild sysroot", &config.options.rebuild_sysroot.to_string());
  print_stat("Reinstall modules", &config.options.reinstall_modules.to_string());
  let bundle = if config.platform.os.bundles_archive() {
    layout.archive().display().to_string()
  } else {
    "not built on this platform".to_string()
  };
  print_stat("Bundle", &bundle);
  println!();
  println!("Tools:");
  print_stat("Python", &tools.python.display().to_string());
  print_stat("Deploy", &tools.deploy.display().to_string());
  print_stat("qmake", &tools.qmake.display().to_string());
  print_stat("Make", &tools.make.display().to_string());
  println!();
  println!("Packages:");
  for url in &config.packages {
    println!("  {}", url);
  }
  Ok(())
}
