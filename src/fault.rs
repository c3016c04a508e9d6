/*!
 * Memory Fault Trap
 *
 * Turns SIGSEGV/SIGBUS into one diagnostic line on stderr and a distinct
 * exit status instead of an unstructured crash. Traversal faults caught in
 * safe code exit with the same status through `BenchError::Fault`.
 */

#[cfg(unix)]
mod imp {
    use crate::core::errors::ExitStatus;
    use nix::libc;
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    const MESSAGE: &[u8] = b"Run failed, caught memory fault\n";

    extern "C" fn on_fault(_signal: libc::c_int) {
        // Only async-signal-safe calls from here on
        unsafe {
            libc::write(libc::STDERR_FILENO, MESSAGE.as_ptr().cast(), MESSAGE.len());
            libc::_exit(ExitStatus::TrappedFault.code());
        }
    }

    pub fn install() -> nix::Result<()> {
        let action = SigAction::new(
            SigHandler::Handler(on_fault),
            SaFlags::SA_RESETHAND,
            SigSet::empty(),
        );
        for signal in [Signal::SIGSEGV, Signal::SIGBUS] {
            // SAFETY: the handler only calls write(2) and _exit(2)
            unsafe { sigaction(signal, &action) }?;
        }
        Ok(())
    }
}

/// Install the process-wide fault handler
#[cfg(unix)]
pub fn install_fault_trap() -> Result<(), std::io::Error> {
    imp::install().map_err(std::io::Error::from)
}

#[cfg(not(unix))]
pub fn install_fault_trap() -> Result<(), std::io::Error> {
    Ok(())
}
