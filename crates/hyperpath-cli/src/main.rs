// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `hyperpath` binary.

fn main() -> anyhow::Result<()> {
    hyperpath_cli::entrypoint()
}
