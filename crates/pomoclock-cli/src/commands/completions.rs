use clap_complete::Shell;

pub fn run(shell: Shell, mut cmd: clap::Command) -> pomoclock_core::Result<()> {
    clap_complete::generate(shell, &mut cmd, "pomoclock", &mut std::io::stdout());
    Ok(())
}
