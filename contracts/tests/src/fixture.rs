//! Deployment fixture shared by the end-to-end tests.
//!
//! On a development network the price feed is a freshly deployed
//! [`MockPriceFeed`]; anywhere else the ledger is bound to an existing feed.

use fund_me::{FundMeContract, FundMeContractClient};
use mock_price_feed::{MockPriceFeed, MockPriceFeedClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

pub const DEVELOPMENT_CHAINS: [&str; 2] = ["standalone", "local"];
pub const DECIMALS: u32 = 8;
pub const INITIAL_ANSWER: i128 = 2000_00000000;

/// Balance handed to every generated account.
pub const STARTING_BALANCE: i128 = 1_000 * ONE_UNIT;
pub const ONE_UNIT: i128 = 10_000_000;

pub struct Deployment<'a> {
    pub deployer: Address,
    pub fund_me: FundMeContractClient<'a>,
    pub mock_price_feed: Option<MockPriceFeedClient<'a>>,
    pub token: TokenClient<'a>,
    pub token_admin: StellarAssetClient<'a>,
}

impl Deployment<'_> {
    /// Generate an account holding [`STARTING_BALANCE`] of the native asset.
    pub fn account(&self, env: &Env) -> Address {
        let account = Address::generate(env);
        self.token_admin.mint(&account, &STARTING_BALANCE);
        account
    }
}

/// Deploy the mock feed, but only on development networks.
pub fn deploy_mocks<'a>(env: &Env, network: &str) -> Option<MockPriceFeedClient<'a>> {
    if !DEVELOPMENT_CHAINS.contains(&network) {
        return None;
    }
    std::println!("Local network detected! Deploying mocks...");
    let contract_id = env.register(MockPriceFeed, ());
    let client = MockPriceFeedClient::new(env, &contract_id);
    client.initialize(&DECIMALS, &INITIAL_ANSWER);
    std::println!("Mocks deployed!");
    Some(client)
}

pub fn deploy_fund_me<'a>(
    env: &Env,
    deployer: &Address,
    price_feed: &Address,
    token: &Address,
) -> FundMeContractClient<'a> {
    let contract_id = env.register(FundMeContract, ());
    let client = FundMeContractClient::new(env, &contract_id);
    client.initialize(deployer, price_feed, token);
    client
}

/// Full deployment. `live_price_feed` is used when `network` is not a
/// development network.
pub fn deploy_all<'a>(env: &Env, network: &str, live_price_feed: Option<&Address>) -> Deployment<'a> {
    env.mock_all_auths();

    let deployer = Address::generate(env);
    let asset = env.register_stellar_asset_contract_v2(deployer.clone());
    let token = TokenClient::new(env, &asset.address());
    let token_admin = StellarAssetClient::new(env, &asset.address());
    token_admin.mint(&deployer, &STARTING_BALANCE);

    let mock_price_feed = deploy_mocks(env, network);
    let price_feed = match (&mock_price_feed, live_price_feed) {
        (Some(mock), _) => mock.address.clone(),
        (None, Some(live)) => live.clone(),
        (None, None) => panic!("no price feed configured for network {network}"),
    };

    let fund_me = deploy_fund_me(env, &deployer, &price_feed, &token.address);

    Deployment {
        deployer,
        fund_me,
        mock_price_feed,
        token,
        token_admin,
    }
}
