//! Bot table
//!
//! The static mapping from bot id to [`BotConfig`]. Primary entries are
//! declared first; aliases copy an earlier entry under a new id.

use indexmap::IndexMap;

use super::config::{BotConfig, TestSpec};
use crate::common::{Error, Result};

/// Flag that makes the device steps publish results to the flakiness dashboard
pub const FLAKINESS_SERVER: &str = "--upload-to-flakiness-server";

const EXTRA_GYP: &str = "extra_gyp_defines";

const COMPILE: &[&str] = &["--compile"];
const STD_HOST_TESTS: &[&str] = &["--host-tests=check_webview_licenses,findbugs"];
const STD_BUILD_OPTS: &[&str] = &["--compile", "--zip-build"];
const STD_TEST_OPTS: &[&str] = &["--extract-build"];
const STD_TESTS: &[&str] = &["ui", "unit"];
const EXPERIMENTAL: &[&str] = &["--experimental"];
const UPDATE_CLANG: &[&str] = &["--update-clang"];
const UPLOAD_FLAKINESS: &[&str] = &[FLAKINESS_SERVER];

/// Bots that share configuration with an earlier entry: `(new id, source id)`
const ALIASES: &[(&str, &str)] = &[
    ("lkgr-clobber", "main-clobber"),
    ("try-builder-dbg", "main-builder-dbg"),
    ("try-builder-rel", "main-builder-rel"),
    ("try-clang-builder", "main-clang-builder"),
    ("try-fyi-builder-dbg", "fyi-builder-dbg"),
    ("try-tests", "main-tests"),
    ("try-fyi-tests", "fyi-tests"),
    ("webkit-latest-tests", "main-tests"),
];

fn primary_bots() -> Vec<BotConfig> {
    let fyi_test_args = [EXPERIMENTAL, UPLOAD_FLAKINESS].concat();

    vec![
        // Main builders
        BotConfig::new("main-builder-dbg", &[STD_BUILD_OPTS, STD_HOST_TESTS].concat()),
        BotConfig::new("main-builder-rel", STD_BUILD_OPTS),
        BotConfig::new("main-clang-builder", COMPILE).with_slave_prop(EXTRA_GYP, "clang=1"),
        BotConfig::new("main-clobber", COMPILE),
        BotConfig::new("main-tests", STD_TEST_OPTS)
            .with_tests(TestSpec::new(STD_TESTS).with_args(UPLOAD_FLAKINESS)),
        // Other waterfalls
        BotConfig::new("asan-builder-tests", &[COMPILE, UPDATE_CLANG].concat())
            .with_tests(TestSpec::new(STD_TESTS).with_args(&["--asan"]))
            .with_slave_prop(EXTRA_GYP, "asan=1"),
        BotConfig::new("chromedriver-fyi-tests-dbg", STD_TEST_OPTS).with_tests(
            TestSpec::new(&["chromedriver"]).with_args(&["--install=ChromiumTestShell"]),
        ),
        BotConfig::new(
            "fyi-builder-dbg",
            &[STD_BUILD_OPTS, STD_HOST_TESTS, EXPERIMENTAL].concat(),
        ),
        BotConfig::new("fyi-builder-rel", &[STD_BUILD_OPTS, EXPERIMENTAL].concat()),
        BotConfig::new("fyi-tests-dbg-ics-gn", &[COMPILE, EXPERIMENTAL].concat())
            .with_tests(TestSpec::new(STD_TESTS).with_args(&fyi_test_args)),
        BotConfig::new("fyi-tests", STD_TEST_OPTS)
            .with_tests(TestSpec::new(STD_TESTS).with_args(&fyi_test_args)),
        BotConfig::new("fyi-component-builder-tests-dbg", COMPILE)
            .with_tests(TestSpec::new(STD_TESTS).with_args(&fyi_test_args))
            .with_slave_prop(EXTRA_GYP, "component=shared_library"),
        BotConfig::new("perf-tests-rel", STD_TEST_OPTS)
            .with_tests(TestSpec::new::<&str>(&[]).with_args(&["--install=ContentShell"])),
        BotConfig::new("webkit-latest-webkit-tests", STD_TEST_OPTS)
            .with_tests(TestSpec::new(&["webkit_layout", "webkit"])),
        BotConfig::new("webkit-latest-contentshell", COMPILE)
            .with_tests(TestSpec::new(&["webkit_layout"])),
        BotConfig::new("builder-unit-tests", COMPILE).with_tests(TestSpec::new(&["unit"])),
        // Generic builder config (for substring match)
        BotConfig::new("builder", STD_BUILD_OPTS),
    ]
}

/// Immutable bot table, iterated in declaration order
#[derive(Debug, Clone)]
pub struct BotTable {
    bots: IndexMap<String, BotConfig>,
}

impl BotTable {
    /// The table of known bots
    pub fn standard() -> Result<Self> {
        Self::build(primary_bots(), ALIASES)
    }

    /// Index `entries` by id, then apply `aliases` in order
    ///
    /// Fails on a duplicate id, or on an alias whose source has not been
    /// declared yet.
    pub fn build(entries: Vec<BotConfig>, aliases: &[(&str, &str)]) -> Result<Self> {
        let mut bots = IndexMap::with_capacity(entries.len() + aliases.len());
        for entry in entries {
            if bots.contains_key(&entry.bot_id) {
                return Err(Error::DuplicateBot(entry.bot_id));
            }
            bots.insert(entry.bot_id.clone(), entry);
        }

        for &(alias, from_id) in aliases {
            if bots.contains_key(alias) {
                return Err(Error::DuplicateBot(alias.to_string()));
            }
            let source: &BotConfig =
                bots.get(from_id).ok_or_else(|| Error::UnknownAliasSource {
                    alias: alias.to_string(),
                    from_id: from_id.to_string(),
                })?;

            let mut copy = source.renamed(alias);
            if copy.is_try_bot() {
                copy.strip_test_arg(FLAKINESS_SERVER);
            }
            bots.insert(alias.to_string(), copy);
        }

        Ok(Self { bots })
    }

    /// Exact lookup
    pub fn get(&self, bot_id: &str) -> Option<&BotConfig> {
        self.bots.get(bot_id)
    }

    /// Bot ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BotTable {
        BotTable::standard().expect("standard table builds")
    }

    #[test]
    fn test_standard_table_has_all_entries() {
        let table = table();
        assert_eq!(table.len(), primary_bots().len() + ALIASES.len());
        for (alias, _) in ALIASES {
            assert!(table.get(alias).is_some(), "missing alias {alias}");
        }
    }

    #[test]
    fn test_main_builder_dbg() {
        let table = table();
        let bot = table.get("main-builder-dbg").unwrap();
        assert_eq!(
            bot.host_opts,
            vec![
                "--compile",
                "--zip-build",
                "--host-tests=check_webview_licenses,findbugs"
            ]
        );
        assert!(bot.test_spec.is_none());
    }

    #[test]
    fn test_alias_is_renamed_copy() {
        let table = table();
        let alias = table.get("lkgr-clobber").unwrap();
        let source = table.get("main-clobber").unwrap();
        assert_eq!(alias.bot_id, "lkgr-clobber");
        assert_eq!(alias.host_opts, source.host_opts);
        assert_eq!(alias.slave_props, source.slave_props);
    }

    #[test]
    fn test_try_aliases_do_not_upload() {
        let table = table();
        let try_tests = table.get("try-tests").unwrap();
        let main_tests = table.get("main-tests").unwrap();

        let try_args = &try_tests.test_spec.as_ref().unwrap().extra_args;
        let main_args = &main_tests.test_spec.as_ref().unwrap().extra_args;
        assert!(!try_args.iter().any(|a| a == FLAKINESS_SERVER));
        assert!(main_args.iter().any(|a| a == FLAKINESS_SERVER));

        let try_fyi = table.get("try-fyi-tests").unwrap();
        assert_eq!(
            try_fyi.test_spec.as_ref().unwrap().extra_args,
            vec!["--experimental"]
        );

        for id in table.ids().filter(|id| id.starts_with("try")) {
            let bot = table.get(id).unwrap();
            if let Some(spec) = &bot.test_spec {
                assert!(!spec.extra_args.iter().any(|a| a == FLAKINESS_SERVER), "{id}");
            }
        }
    }

    #[test]
    fn test_non_try_alias_keeps_upload_flag() {
        let table = table();
        let bot = table.get("webkit-latest-tests").unwrap();
        assert_eq!(
            bot.test_spec.as_ref().unwrap().extra_args,
            vec![FLAKINESS_SERVER]
        );
    }

    #[test]
    fn test_duplicate_primary_fails() {
        let entries = vec![
            BotConfig::new("builder", COMPILE),
            BotConfig::new("builder", STD_BUILD_OPTS),
        ];
        let err = BotTable::build(entries, &[]).unwrap_err();
        assert!(matches!(err, Error::DuplicateBot(id) if id == "builder"));
    }

    #[test]
    fn test_alias_collision_fails() {
        let entries = vec![
            BotConfig::new("main-clobber", COMPILE),
            BotConfig::new("lkgr-clobber", COMPILE),
        ];
        let err = BotTable::build(entries, &[("lkgr-clobber", "main-clobber")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateBot(id) if id == "lkgr-clobber"));
    }

    #[test]
    fn test_alias_source_must_exist() {
        let entries = vec![BotConfig::new("main-clobber", COMPILE)];
        let err = BotTable::build(entries, &[("try-tests", "main-tests")]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownAliasSource { ref alias, ref from_id }
                if alias == "try-tests" && from_id == "main-tests"
        ));
    }

    #[test]
    fn test_alias_can_copy_earlier_alias() {
        let entries = vec![BotConfig::new("main-clobber", COMPILE)];
        let table = BotTable::build(
            entries,
            &[("lkgr-clobber", "main-clobber"), ("try-clobber", "lkgr-clobber")],
        )
        .unwrap();
        assert_eq!(table.get("try-clobber").unwrap().host_opts, vec!["--compile"]);
    }

    #[test]
    fn test_ids_follow_declaration_order() {
        let table = table();
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids.first(), Some(&"main-builder-dbg"));
        assert_eq!(ids.last(), Some(&"webkit-latest-tests"));
    }
}
