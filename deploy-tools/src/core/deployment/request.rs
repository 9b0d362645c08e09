// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract creation over JSON-RPC.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{Provider, WalletProvider},
    rpc::types::TransactionRequest,
};

use super::{ContractCreator, Deployment, DeploymentError};
use crate::utils::color::DebugColor;

/// Contract creation transaction request.
///
/// Gas, fees, nonce and chain id are left to the provider's fillers.
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
}

impl DeploymentRequest {
    pub fn new(sender: Address, code: Bytes) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
        }
    }

    /// Sends the transaction and waits for it to be mined.
    pub async fn exec(self, provider: &impl Provider) -> Result<Deployment, DeploymentError> {
        let tx = provider.send_transaction(self.tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tx
            .get_receipt()
            .await
            .map_err(|err| DeploymentError::FailedToComplete {
                tx_hash,
                reason: err.to_string(),
            })?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::NoContractAddress { tx_hash })?;

        Ok(Deployment {
            address,
            tx_hash,
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        })
    }
}

/// [`ContractCreator`] backed by an alloy provider with a wallet attached.
#[derive(Debug)]
pub struct RpcCreator<P> {
    provider: P,
}

impl<P: Provider + WalletProvider> RpcCreator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider + WalletProvider> ContractCreator for RpcCreator<P> {
    fn sender(&self) -> Address {
        self.provider.default_signer_address()
    }

    async fn chain_id(&self) -> Result<u64, DeploymentError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn create(&self, code: Bytes) -> Result<Deployment, DeploymentError> {
        DeploymentRequest::new(self.sender(), code)
            .exec(&self.provider)
            .await
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        network::EthereumWallet,
        primitives::{address, b256, TxHash, U64},
        providers::ProviderBuilder,
        signers::local::PrivateKeySigner,
        transports::mock::Asserter,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::core::{
        artifact::{tests::artifact_json, ContractArtifact},
        deployment::deploy,
        network::{NetworkRegistry, ARBITRUM_GOERLI},
    };

    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const TX_HASH: TxHash =
        b256!("1f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c5b6a7988");

    fn receipt(status: bool, contract_address: Option<Address>) -> Value {
        json!({
            "type": "0x2",
            "status": if status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x1a2b3",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            "blockNumber": "0x7",
            "gasUsed": "0x1a2b3",
            "effectiveGasPrice": "0x5f5e100",
            "from": SENDER,
            "to": null,
            "contractAddress": contract_address
        })
    }

    fn provider(asserter: &Asserter) -> impl Provider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
    }

    async fn exec_against(asserter: &Asserter) -> Result<Deployment, DeploymentError> {
        DeploymentRequest::new(SENDER, Bytes::from_static(&[0x60, 0x80]))
            .exec(&provider(asserter))
            .await
    }

    #[tokio::test]
    async fn mined_creation() {
        let asserter = Asserter::new();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(true, Some(CONTRACT)));

        let deployment = exec_against(&asserter).await.unwrap();
        assert_eq!(
            deployment,
            Deployment {
                address: CONTRACT,
                tx_hash: TX_HASH,
                gas_used: 0x1a2b3,
                block_number: Some(7),
            }
        );
    }

    #[tokio::test]
    async fn reverted_creation() {
        let asserter = Asserter::new();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(false, Some(CONTRACT)));

        let err = exec_against(&asserter).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Reverted { tx_hash } if tx_hash == TX_HASH));
    }

    #[tokio::test]
    async fn receipt_without_contract_address() {
        let asserter = Asserter::new();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(true, None));

        let err = exec_against(&asserter).await.unwrap_err();
        assert!(matches!(err, DeploymentError::NoContractAddress { tx_hash } if tx_hash == TX_HASH));
    }

    #[tokio::test]
    async fn receipt_never_arrives() {
        let asserter = Asserter::new();
        asserter.push_success(&TX_HASH);

        let err = exec_against(&asserter).await.unwrap_err();
        assert!(matches!(err, DeploymentError::FailedToComplete { tx_hash, .. } if tx_hash == TX_HASH));
    }

    #[tokio::test]
    async fn rejected_submission() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let err = exec_against(&asserter).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Rpc(_)));
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn rpc_creator_checks_chain_before_sending() {
        let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .wallet(EthereumWallet::new(signer))
            .connect_mocked_client(asserter.clone());
        let creator = RpcCreator::new(provider);
        assert_eq!(creator.sender(), SENDER);

        // Goerli is declared as 421613; the endpoint answers with the Sepolia rollup's id
        asserter.push_success(&U64::from(421614u64));
        let artifact = ContractArtifact::from_json(&artifact_json("ColorClash", "0x6080")).unwrap();
        let profile = NetworkRegistry::builtin()
            .get(ARBITRUM_GOERLI)
            .unwrap()
            .clone();
        let err = deploy(&artifact, &profile, &creator).await.unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::ChainIdMismatch {
                expected: 421613,
                actual: 421614,
                ..
            }
        ));
    }
}
