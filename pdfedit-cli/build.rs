use clap::CommandFactory;

#[path = "src/cli.rs"]
mod cli;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir =
        std::path::PathBuf::from(std::env::var_os("OUT_DIR").ok_or(std::io::ErrorKind::NotFound)?);
    let cmd = cli::Cli::command();

    let mut buffer: Vec<u8> = Default::default();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    std::fs::write(out_dir.join("pdfedit.1"), buffer)?;

    // One page per subcommand, named the way man(1) looks them up.
    for sub in cmd.get_subcommands() {
        let name = format!("pdfedit-{}", sub.get_name());
        let mut buffer: Vec<u8> = Default::default();
        clap_mangen::Man::new(sub.clone().name(name.clone())).render(&mut buffer)?;
        std::fs::write(out_dir.join(format!("{name}.1")), buffer)?;
    }

    Ok(())
}
