/**
 * Windows Timeline keeps a per user record of application usage and content
 * switches in an SQLITE database at
 * `\Users\%USERNAME%\AppData\Local\ConnectedDevicesPlatform\<identity>\ActivitiesCache.db`
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/whats-new/whats-new-windows-10-version-1803`
 * `https://www.group-ib.com/blog/windows10_timeline/`
 *
 * Other parsers:
 * `https://ericzimmerman.github.io/`
 */
pub(crate) mod error;
pub(crate) mod records;
pub(crate) mod schema;
pub(crate) mod store;
