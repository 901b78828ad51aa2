use super::env_file::EnvFile;

/// Environment variables autox knows about.
///
/// Secret-flagged keys are never copied from the process environment
/// into a freshly created environment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    AppUrl,
    ApiUrl,
    ApiKey,
    AwsRegion,
    AwsAvailabilityZone,
    AwsAccountId,
    AwsAccessKeyId,
    AwsSecretAccessKey,
    EksClusterName,
    GithubToken,
    GithubRepoOwner,
    TfGithubRepo,
    TfGithubBranch,
}

impl ConfigKey {
    /// Every recognized key, in the order they are written to new files.
    pub const ALL: [ConfigKey; 13] = [
        ConfigKey::AppUrl,
        ConfigKey::ApiUrl,
        ConfigKey::ApiKey,
        ConfigKey::AwsRegion,
        ConfigKey::AwsAvailabilityZone,
        ConfigKey::AwsAccountId,
        ConfigKey::AwsAccessKeyId,
        ConfigKey::AwsSecretAccessKey,
        ConfigKey::EksClusterName,
        ConfigKey::GithubToken,
        ConfigKey::GithubRepoOwner,
        ConfigKey::TfGithubRepo,
        ConfigKey::TfGithubBranch,
    ];

    /// Name of the environment variable backing this key.
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigKey::AppUrl => "APP_URL",
            ConfigKey::ApiUrl => "API_URL",
            ConfigKey::ApiKey => "API_KEY",
            ConfigKey::AwsRegion => "AWS_REGION",
            ConfigKey::AwsAvailabilityZone => "AWS_AVAILABILITY_ZONE",
            ConfigKey::AwsAccountId => "AWS_ACCOUNT_ID",
            ConfigKey::AwsAccessKeyId => "AWS_ACCESS_KEY_ID",
            ConfigKey::AwsSecretAccessKey => "AWS_SECRET_ACCESS_KEY",
            ConfigKey::EksClusterName => "EKS_CLUSTER_NAME",
            ConfigKey::GithubToken => "GITHUB_TOKEN",
            ConfigKey::GithubRepoOwner => "GITHUB_REPO_OWNER",
            ConfigKey::TfGithubRepo => "TF_GITHUB_REPO",
            ConfigKey::TfGithubBranch => "TF_GITHUB_BRANCH",
        }
    }

    pub fn is_secret(self) -> bool {
        match self {
            ConfigKey::ApiKey
            | ConfigKey::AwsAccessKeyId
            | ConfigKey::AwsSecretAccessKey
            | ConfigKey::GithubToken => true,
            ConfigKey::AppUrl
            | ConfigKey::ApiUrl
            | ConfigKey::AwsRegion
            | ConfigKey::AwsAvailabilityZone
            | ConfigKey::AwsAccountId
            | ConfigKey::EksClusterName
            | ConfigKey::GithubRepoOwner
            | ConfigKey::TfGithubRepo
            | ConfigKey::TfGithubBranch => false,
        }
    }

    /// Look up a key by its environment variable name.
    pub fn from_env_var(name: &str) -> Option<ConfigKey> {
        ConfigKey::ALL.into_iter().find(|k| k.env_var() == name)
    }
}

/// Whether a variable name should be masked when displayed.
pub fn is_secret_var(name: &str) -> bool {
    ConfigKey::from_env_var(name).is_some_and(ConfigKey::is_secret)
}

/// Build the seed contents of a new environment file.
///
/// Every non-secret key is written, with an empty value when `lookup`
/// has nothing for it.
pub fn snapshot_defaults<F>(lookup: F) -> EnvFile
where
    F: Fn(&str) -> Option<String>,
{
    let mut file = EnvFile::default();
    for key in ConfigKey::ALL.into_iter().filter(|k| !k.is_secret()) {
        let value = lookup(key.env_var()).unwrap_or_default();
        file.push(key.env_var(), value);
    }
    file
}
