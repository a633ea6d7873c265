pub(super) const ROOT_LONG_ABOUT: &str = "\
File integrity checker for baselining and scanning directory trees

integrity-checker records a SHA-256 checksum of every readable file in a directory
tree (the baseline) and later reports which files were added, deleted, or modified
relative to that baseline. Checks are run on demand; nothing is watched continuously.

CORE CONCEPTS:

  Baseline file:
    A TOML file mapping each file's path (relative to the scanned directory, always
    '/'-separated) to the SHA-256 of its content. It is plain text and sorted by
    path so it can be audited by hand. Only one baseline is kept; creating a new
    one replaces the old one.

  Unreadable files:
    Files that cannot be read (permissions, vanished mid-scan, I/O errors) are left
    out of a scan instead of failing it. A file that was readable when the baseline
    was created and is unreadable now is therefore reported as deleted.

TYPICAL WORKFLOW:

  1. Record the current state:
     $ integrity-checker baseline /srv/www

  2. Later, look for changes:
     $ integrity-checker scan /srv/www

  3. After reviewing and accepting the changes, record a new baseline:
     $ integrity-checker baseline /srv/www

GLOBAL OPTIONS:

  -C <DIRECTORY>
    Change to directory before operating (like git -C or make -C). Relative
    PATH and --baseline arguments are resolved from there.

  --baseline <FILE>
    Where the baseline is stored. Defaults to baseline_hashes.toml in the
    current directory. The baseline file is never included in a scan, even when
    it lives inside the scanned tree.

EXIT STATUS:

  0    success (for scan: no changes detected)
  1    scan detected changes
  2    scan found no baseline to compare against
  255  any other error (unreadable or corrupt baseline, invalid directory, ...)
";

pub(super) const BASELINE_LONG_ABOUT: &str = "\
Create a baseline of a directory tree

Checksums every readable regular file under PATH (recursively) and writes the
result to the baseline file, replacing any previous baseline.

BEHAVIOR:

  - Symlinks to regular files are checksummed through the link.
  - Symlinks to directories are not followed, so symlink cycles are harmless.
  - Sockets, FIFOs, devices and broken symlinks are ignored.
  - Files that cannot be read are skipped. Directories that cannot be read
    are skipped with a warning.
  - The baseline is written atomically: a crash mid-write leaves the old
    baseline intact.

EXAMPLES:

  # Baseline the current directory
  $ integrity-checker baseline

  # Baseline a specific directory, storing the baseline elsewhere
  $ integrity-checker --baseline /var/lib/fim/www.toml baseline /srv/www
";

pub(super) const SCAN_LONG_ABOUT: &str = "\
Compare a directory tree against the stored baseline

Loads the baseline, checksums every readable file under PATH, and prints one line
per change:

  A  path    new file (not in the baseline)
  D  path    deleted file (in the baseline, missing or unreadable now)
  M  path    modified file (content checksum differs)
  .  path    unchanged file (only with --all)

Only content is compared. Changes to mtime, permissions or ownership alone are not
reported.

If no baseline exists, nothing is scanned and the command exits with status 2. If
the baseline exists but cannot be parsed, nothing is scanned and the command fails;
a corrupt baseline is never treated as empty.

EXAMPLES:

  # Scan the current directory
  $ integrity-checker scan

  # Scheduled check
  $ integrity-checker -C /srv scan www || alert_admin
";
